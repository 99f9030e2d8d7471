use frames::{BlueprintSummary, Point};

use super::*;

fn listed(names: &[&str]) -> BlueprintsState {
    BlueprintsState {
        items: names
            .iter()
            .map(|name| BlueprintSummary { name: (*name).to_owned(), points: Vec::<Point>::new() })
            .collect(),
        ..BlueprintsState::default()
    }
}

#[test]
fn blank_name_is_refused() {
    assert_eq!(validate_new_name("   ", &listed(&[])), Err(EMPTY_NAME_MESSAGE));
    assert_eq!(validate_new_name("", &listed(&[])), Err(EMPTY_NAME_MESSAGE));
}

#[test]
fn name_is_trimmed() {
    assert_eq!(validate_new_name("  casa  ", &listed(&[])), Ok("casa".to_owned()));
}

#[test]
fn listed_name_is_refused() {
    assert_eq!(validate_new_name("casa", &listed(&["casa"])), Err(DUPLICATE_NAME_MESSAGE));
}

#[test]
fn delete_prompt_quotes_name() {
    assert_eq!(delete_prompt("casa"), "¿Estás seguro de eliminar el plano \"casa\"?");
}

#[test]
fn failure_text_appends_server_reason() {
    let err = ApiError::Rejected { status: 409, message: "Blueprint already exists".to_owned() };
    assert_eq!(failure_text(&err, "Error al crear el plano"), "Error al crear el plano: Blueprint already exists");
}

#[test]
fn failure_text_hides_network_details() {
    let err = ApiError::Network("TypeError: Failed to fetch".to_owned());
    assert_eq!(failure_text(&err, "Error al guardar el plano"), "Error al guardar el plano");
}
