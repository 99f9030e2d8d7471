use super::*;
use serde_json::json;

// =============================================================
// EnginePacket
// =============================================================

#[test]
fn decodes_open_handshake() {
    let text = r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
    let EnginePacket::Open(handshake) = EnginePacket::decode(text).expect("decode") else {
        panic!("expected open packet");
    };
    assert_eq!(handshake.sid, "abc");
    assert_eq!(handshake.ping_interval, 25_000);
    assert_eq!(handshake.max_payload, Some(1_000_000));
}

#[test]
fn decodes_transport_control_packets() {
    assert_eq!(EnginePacket::decode("1").expect("close"), EnginePacket::Close);
    assert_eq!(EnginePacket::decode("2").expect("ping"), EnginePacket::Ping(String::new()));
    assert_eq!(
        EnginePacket::decode("2probe").expect("ping"),
        EnginePacket::Ping("probe".to_owned())
    );
    assert_eq!(EnginePacket::decode("6").expect("noop"), EnginePacket::Noop);
}

#[test]
fn pong_echoes_ping_payload() {
    assert_eq!(EnginePacket::Pong(String::new()).encode().expect("encode"), "3");
    assert_eq!(EnginePacket::Pong("probe".to_owned()).encode().expect("encode"), "3probe");
}

#[test]
fn engine_rejects_empty_unknown_and_binary() {
    assert!(matches!(EnginePacket::decode(""), Err(CodecError::Empty)));
    assert!(matches!(EnginePacket::decode("9"), Err(CodecError::UnknownPacketType('9'))));
    assert!(matches!(EnginePacket::decode("bAQID"), Err(CodecError::Unsupported)));
}

#[test]
fn malformed_open_payload_is_json_error() {
    assert!(matches!(EnginePacket::decode("0{not json"), Err(CodecError::Json(_))));
}

// =============================================================
// SocketPacket encode
// =============================================================

#[test]
fn connect_with_token_encodes_auth_object() {
    let packet = SocketPacket::connect(Some(json!({ "token": "t-1" })));
    assert_eq!(packet.to_engine_text().expect("encode"), r#"40{"token":"t-1"}"#);
}

#[test]
fn connect_without_auth_is_bare() {
    assert_eq!(SocketPacket::connect(None).to_engine_text().expect("encode"), "40");
}

#[test]
fn join_room_event_encodes_name_and_payload() {
    let packet = SocketPacket::event("join-room", json!("blueprints.juan.plano-1"));
    assert_eq!(
        packet.to_engine_text().expect("encode"),
        r#"42["join-room","blueprints.juan.plano-1"]"#
    );
}

#[test]
fn disconnect_encodes_short_form() {
    assert_eq!(SocketPacket::disconnect().to_engine_text().expect("encode"), "41");
}

#[test]
fn custom_namespace_and_ack_id_are_encoded() {
    let packet = SocketPacket::Event {
        namespace: "/admin".to_owned(),
        id: Some(12),
        name: "ping".to_owned(),
        args: Vec::new(),
    };
    assert_eq!(packet.encode().expect("encode"), r#"2/admin,12["ping"]"#);
}

// =============================================================
// SocketPacket decode
// =============================================================

#[test]
fn decodes_connect_ack_with_sid() {
    let packet = SocketPacket::decode(r#"0{"sid":"xyz"}"#).expect("decode");
    assert_eq!(
        packet,
        SocketPacket::Connect { namespace: "/".to_owned(), data: Some(json!({ "sid": "xyz" })) }
    );
}

#[test]
fn decodes_blueprint_update_event() {
    let text = r#"2["blueprint-update",{"author":"juan","name":"plano-1","points":[{"x":10,"y":20}]}]"#;
    let SocketPacket::Event { name, args, id, .. } = SocketPacket::decode(text).expect("decode") else {
        panic!("expected event");
    };
    assert_eq!(name, "blueprint-update");
    assert_eq!(id, None);
    assert_eq!(args.len(), 1);
    assert_eq!(args[0]["points"][0]["x"], json!(10));
}

#[test]
fn decodes_namespaced_event_with_ack_id() {
    let SocketPacket::Event { namespace, id, name, .. } =
        SocketPacket::decode(r#"2/admin,7["hello"]"#).expect("decode")
    else {
        panic!("expected event");
    };
    assert_eq!(namespace, "/admin");
    assert_eq!(id, Some(7));
    assert_eq!(name, "hello");
}

#[test]
fn decodes_connect_error_message() {
    let packet = SocketPacket::decode(r#"4{"message":"invalid token"}"#).expect("decode");
    let SocketPacket::ConnectError { data, .. } = packet else {
        panic!("expected connect error");
    };
    assert_eq!(connect_error_message(data.as_ref()), "invalid token");
    assert_eq!(connect_error_message(None), "connection refused");
}

#[test]
fn decodes_disconnect_and_ack() {
    assert_eq!(
        SocketPacket::decode("1").expect("decode"),
        SocketPacket::Disconnect { namespace: "/".to_owned() }
    );
    assert_eq!(
        SocketPacket::decode(r#"35["ok"]"#).expect("decode"),
        SocketPacket::Ack { namespace: "/".to_owned(), id: 5, args: vec![json!("ok")] }
    );
}

#[test]
fn event_without_string_name_is_malformed() {
    assert!(matches!(SocketPacket::decode("2[]"), Err(CodecError::MalformedEvent)));
    assert!(matches!(SocketPacket::decode("2[42]"), Err(CodecError::MalformedEvent)));
    assert!(matches!(SocketPacket::decode("2"), Err(CodecError::MalformedEvent)));
}

#[test]
fn binary_socket_packets_are_unsupported() {
    assert!(matches!(
        SocketPacket::decode(r#"51-["file",{"_placeholder":true,"num":0}]"#),
        Err(CodecError::Unsupported)
    ));
}
