use super::*;

// =============================================================
// Point
// =============================================================

#[test]
fn point_parses_comma_separated_text() {
    assert_eq!("10,20".parse::<Point>().expect("point"), Point::new(10, 20));
    assert_eq!(" -3 , 7 ".parse::<Point>().expect("point"), Point::new(-3, 7));
}

#[test]
fn point_rejects_missing_separator_or_non_integers() {
    assert!("10".parse::<Point>().is_err());
    assert!("a,b".parse::<Point>().is_err());
    assert!("1.5,2".parse::<Point>().is_err());
}

#[test]
fn point_display_matches_parse_format() {
    assert_eq!(Point::new(5, -6).to_string(), "5,-6");
}

#[test]
fn point_serializes_as_xy_object() {
    let json = serde_json::to_value(Point::new(10, 20)).expect("serialize");
    assert_eq!(json, serde_json::json!({ "x": 10, "y": 20 }));
}

// =============================================================
// BlueprintKey
// =============================================================

#[test]
fn key_trims_and_derives_room_and_topic() {
    let key = BlueprintKey::new(" juan ", "plano-1").expect("key");
    assert_eq!(key.author, "juan");
    assert_eq!(key.room(), "blueprints.juan.plano-1");
    assert_eq!(key.topic(), "/topic/blueprints.juan.plano-1");
    assert_eq!(key.to_string(), "juan/plano-1");
}

#[test]
fn key_rejects_blank_parts() {
    assert_eq!(BlueprintKey::new("", "plano-1"), Err(KeyError::EmptyAuthor));
    assert_eq!(BlueprintKey::new("juan", "   "), Err(KeyError::EmptyName));
}

#[test]
fn key_rejects_path_separators() {
    assert_eq!(
        BlueprintKey::new("juan", "a/b"),
        Err(KeyError::Slash("a/b".to_owned()))
    );
}

// =============================================================
// Payloads
// =============================================================

#[test]
fn summary_defaults_missing_points_to_empty() {
    let summary: BlueprintSummary =
        serde_json::from_value(serde_json::json!({ "name": "plano-2" })).expect("summary");
    assert_eq!(summary.point_count(), 0);
}

#[test]
fn update_without_identity_takes_key_fields() {
    let key = BlueprintKey::new("juan", "plano-1").expect("key");
    let update: BlueprintUpdate =
        serde_json::from_value(serde_json::json!({ "points": [{ "x": 1, "y": 2 }] })).expect("update");
    let blueprint = update.into_blueprint(&key);
    assert_eq!(blueprint.author, "juan");
    assert_eq!(blueprint.name, "plano-1");
    assert_eq!(blueprint.points, vec![Point::new(1, 2)]);
}

#[test]
fn update_with_identity_keeps_payload_fields() {
    let key = BlueprintKey::new("juan", "plano-1").expect("key");
    let update: BlueprintUpdate = serde_json::from_value(serde_json::json!({
        "author": "ana", "name": "casa", "points": []
    }))
    .expect("update");
    let blueprint = update.into_blueprint(&key);
    assert_eq!((blueprint.author.as_str(), blueprint.name.as_str()), ("ana", "casa"));
}

#[test]
fn user_ignores_unknown_profile_fields() {
    let session: AuthSession = serde_json::from_value(serde_json::json!({
        "token": "t-1",
        "user": { "username": "juan", "id": 7, "createdAt": "2024-01-01" }
    }))
    .expect("session");
    assert_eq!(session.user.username, "juan");
}

#[test]
fn room_draw_event_serializes_all_fields() {
    let event = RoomDrawEvent {
        room: "blueprints.juan.plano-1".to_owned(),
        author: "juan".to_owned(),
        name: "plano-1".to_owned(),
        point: Point::new(3, 4),
    };
    let json = serde_json::to_value(&event).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "room": "blueprints.juan.plano-1",
            "author": "juan",
            "name": "plano-1",
            "point": { "x": 3, "y": 4 }
        })
    );
}
