use super::*;

#[test]
fn default_transport_is_room_based() {
    assert_eq!(TransportKind::default(), TransportKind::Room);
}

#[test]
fn transport_parses_wire_names() {
    assert_eq!("stomp".parse::<TransportKind>().expect("stomp"), TransportKind::Topic);
    assert_eq!("SocketIO".parse::<TransportKind>().expect("socketio"), TransportKind::Room);
    assert!(matches!("mqtt".parse::<TransportKind>(), Err(LinkError::UnknownTransport(_))));
}

#[test]
fn transport_serializes_wire_names() {
    assert_eq!(serde_json::to_string(&TransportKind::Topic).expect("json"), "\"stomp\"");
    assert_eq!(serde_json::to_string(&TransportKind::Room).expect("json"), "\"socketio\"");
}

#[test]
fn rest_base_follows_transport() {
    let endpoints = Endpoints::default();
    assert_eq!(endpoints.rest_base(TransportKind::Topic), "http://localhost:8080");
    assert_eq!(endpoints.rest_base(TransportKind::Room), "http://localhost:3001");
}

#[test]
fn socket_urls_use_ws_scheme_and_protocol_path() {
    let endpoints = Endpoints::default();
    assert_eq!(endpoints.socket_url(TransportKind::Topic), "ws://localhost:8080/ws-blueprints");
    assert_eq!(
        endpoints.socket_url(TransportKind::Room),
        "ws://localhost:3001/socket.io/?EIO=4&transport=websocket"
    );
}

#[test]
fn https_bases_become_wss() {
    let endpoints = Endpoints {
        api_base: "https://api.example.com/".to_owned(),
        io_base: "https://io.example.com".to_owned(),
        stomp_path: "stomp".to_owned(),
    };
    assert_eq!(endpoints.socket_url(TransportKind::Topic), "wss://api.example.com/stomp");
    assert!(endpoints.socket_url(TransportKind::Room).starts_with("wss://io.example.com/socket.io/"));
}

#[test]
fn host_strips_scheme_port_and_path() {
    assert_eq!(host_of("http://localhost:8080"), "localhost");
    assert_eq!(host_of("https://user@api.example.com:443/base"), "api.example.com");
    assert_eq!(host_of(""), "localhost");
}

#[test]
fn link_config_validates_key_and_drops_blank_token() {
    let config = LinkConfig::new(TransportKind::Room, " juan ", "plano-1", Some("  ".to_owned())).expect("config");
    assert_eq!(config.key.author, "juan");
    assert_eq!(config.token, None);

    assert!(matches!(
        LinkConfig::new(TransportKind::Topic, "", "plano-1", None),
        Err(LinkError::InvalidKey(frames::KeyError::EmptyAuthor))
    ));
    assert!(matches!(
        LinkConfig::new(TransportKind::Topic, "juan", "   ", None),
        Err(LinkError::InvalidKey(frames::KeyError::EmptyName))
    ));
}
