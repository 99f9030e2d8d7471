use clap::CommandFactory;

use super::*;

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn defaults_target_local_backends_over_socketio() {
    let cli = Cli::try_parse_from(["blueprints-cli", "blueprint", "list", "juan"]).expect("parses");
    assert_eq!(cli.transport, TransportKind::Room);
    assert_eq!(cli.api_base, "http://localhost:8080");
    assert_eq!(cli.io_base, "http://localhost:3001");
    assert_eq!(cli.stomp_path, "/ws-blueprints");
    assert!(matches!(cli.command, Command::Blueprint(BlueprintCommand { command: BlueprintSubcommand::List { ref author } }) if author == "juan"));
}

#[test]
fn transport_accepts_stomp() {
    let cli = Cli::try_parse_from(["blueprints-cli", "--transport", "stomp", "watch", "juan", "plano-1"]).expect("parses");
    assert_eq!(cli.transport, TransportKind::Topic);
    assert!(matches!(cli.command, Command::Watch(Target { ref author, ref name }) if author == "juan" && name == "plano-1"));
}

#[test]
fn unknown_transport_is_rejected() {
    assert!(Cli::try_parse_from(["blueprints-cli", "--transport", "mqtt", "auth", "verify"]).is_err());
}

#[test]
fn draw_parses_points_including_negative() {
    let cli = Cli::try_parse_from(["blueprints-cli", "draw", "juan", "plano-1", "10,20", "-3,4"]).expect("parses");
    let Command::Draw { target, points } = cli.command else {
        panic!("expected draw");
    };
    assert_eq!(target, Target { author: "juan".to_owned(), name: "plano-1".to_owned() });
    assert_eq!(points, vec![Point::new(10, 20), Point::new(-3, 4)]);
}

#[test]
fn draw_requires_points() {
    assert!(Cli::try_parse_from(["blueprints-cli", "draw", "juan", "plano-1"]).is_err());
}

#[test]
fn malformed_point_is_rejected() {
    assert!(Cli::try_parse_from(["blueprints-cli", "draw", "juan", "plano-1", "10;20"]).is_err());
}

#[test]
fn rest_base_follows_transport() {
    let ctx = CliContext { transport: TransportKind::Topic, endpoints: Endpoints::default(), token: None };
    let config = ctx.link(&Target { author: "juan".to_owned(), name: "plano-1".to_owned() }).expect("config");
    assert_eq!(config.kind, TransportKind::Topic);
    assert_eq!(ctx.endpoints.rest_base(ctx.transport), "http://localhost:8080");
}

#[test]
fn blank_target_is_key_error() {
    let target = Target { author: " ".to_owned(), name: "plano-1".to_owned() };
    assert!(matches!(target.key(), Err(CliError::Key(KeyError::EmptyAuthor))));
}

#[test]
fn verbosity_maps_to_levels() {
    assert_eq!(log_level(0), tracing::Level::INFO);
    assert_eq!(log_level(1), tracing::Level::DEBUG);
    assert_eq!(log_level(5), tracing::Level::TRACE);
}
