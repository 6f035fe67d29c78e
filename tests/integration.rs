// SPDX-License-Identifier: MPL-2.0
use iced_identify::classifier::{ModelState, Prediction};
use iced_identify::config::{self, Config};
use iced_identify::media::{ImageData, ImageSource};
use iced_identify::ui::identify::{Effect, ImageState, Message, State};
use std::path::PathBuf;
use tempfile::tempdir;

fn sample_image() -> ImageData {
    ImageData::from_rgba(2, 2, vec![200_u8; 16])
}

/// Selects `address` through the URL field and completes its load.
fn select_and_load(state: &mut State, address: &str) {
    state.update(Message::UrlInputChanged(address.to_string()));
    let Effect::LoadImage { generation, .. } = state.update(Message::UrlSubmitted) else {
        panic!("expected LoadImage effect for {address}");
    };
    state.update(Message::ImageLoaded {
        generation,
        result: Ok(sample_image()),
    });
}

#[test]
fn test_settings_round_trip_via_config_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    let written = Config {
        model_url: Some("https://example.com/custom.onnx".to_string()),
        labels_url: None,
        model_checksum: Some("0123abcd".to_string()),
        top_k: Some(3),
    };
    config::save_to_path(&written, &temp_config_file_path)
        .expect("Failed to write config file");

    let loaded = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load config from path");
    assert_eq!(loaded, written);
    assert_eq!(loaded.top_k(), 3);
    assert_eq!(loaded.model_url(), "https://example.com/custom.onnx");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_full_identify_flow_from_selection_to_results() {
    let mut state = State::new();
    state.update(Message::ModelStateChanged(ModelState::Ready));

    // Select a file through the dialog result.
    let path = PathBuf::from("/tmp/photos/cat.jpg");
    let Effect::LoadImage { source, generation } =
        state.update(Message::FileChosen(Some(path.clone())))
    else {
        panic!("expected LoadImage effect");
    };
    assert_eq!(source, ImageSource::Path(path.clone()));
    assert!(matches!(state.image_state(), ImageState::Loading { .. }));

    // Load completes; the image becomes displayable and the history entry
    // gains its thumbnail.
    state.update(Message::ImageLoaded {
        generation,
        result: Ok(sample_image()),
    });
    assert!(matches!(state.image_state(), ImageState::Ready { .. }));
    assert!(state.history()[0].thumbnail.is_some());
    assert!(state.can_identify());

    // Identify and deliver predictions best-guess-first.
    let Effect::Classify { generation, .. } = state.update(Message::IdentifyPressed) else {
        panic!("expected Classify effect");
    };
    state.update(Message::Classified {
        generation,
        result: Ok(vec![
            Prediction {
                label: "tabby".into(),
                probability: 0.87,
            },
            Prediction {
                label: "tiger cat".into(),
                probability: 0.09,
            },
        ]),
    });

    assert_eq!(state.results().len(), 2);
    assert_eq!(state.results()[0].label, "tabby");
    assert!(state.error().is_none());
    assert!(!state.is_classifying());
}

#[test]
fn test_history_round_trip_restores_earlier_source() {
    let mut state = State::new();
    state.update(Message::ModelStateChanged(ModelState::Ready));

    select_and_load(&mut state, "https://example.com/a.png");
    select_and_load(&mut state, "https://example.com/b.png");
    assert_eq!(state.history().len(), 2);

    // Click the older entry (most-recent-first, so index 1 is A).
    let Effect::LoadImage { source, generation } = state.update(Message::HistoryClicked(1))
    else {
        panic!("expected LoadImage effect");
    };
    assert_eq!(source, ImageSource::Url("https://example.com/a.png".into()));

    state.update(Message::ImageLoaded {
        generation,
        result: Ok(sample_image()),
    });

    assert!(matches!(state.image_state(), ImageState::Ready { .. }));
    assert_eq!(
        state.current_source(),
        Some(&ImageSource::Url("https://example.com/a.png".into()))
    );
    // Re-selection never grows the history.
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_superseded_selection_never_surfaces() {
    let mut state = State::new();
    state.update(Message::ModelStateChanged(ModelState::Ready));

    state.update(Message::UrlInputChanged("https://example.com/slow.png".into()));
    let Effect::LoadImage {
        generation: slow_generation,
        ..
    } = state.update(Message::UrlSubmitted)
    else {
        panic!("expected LoadImage effect");
    };

    // The user switches to a second image before the first load finishes,
    // identifies it, and only then does the first load complete.
    select_and_load(&mut state, "https://example.com/fast.png");
    let Effect::Classify { generation, .. } = state.update(Message::IdentifyPressed) else {
        panic!("expected Classify effect");
    };

    state.update(Message::ImageLoaded {
        generation: slow_generation,
        result: Ok(sample_image()),
    });
    state.update(Message::Classified {
        generation,
        result: Ok(vec![Prediction {
            label: "goldfish".into(),
            probability: 0.6,
        }]),
    });

    assert_eq!(
        state.current_source(),
        Some(&ImageSource::Url("https://example.com/fast.png".into()))
    );
    assert_eq!(state.results()[0].label, "goldfish");
}
