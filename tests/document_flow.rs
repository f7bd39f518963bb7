use consultgen::tui::{App, AppEvent, Screen, StreamPhase, GENERATE_ERROR, REFINE_ERROR};

fn fill_entry(app: &mut App, company: &str, domain: &str) {
    for c in company.chars() {
        app.entry.company.insert(c);
    }
    app.entry.next_field();
    for c in domain.chars() {
        app.entry.task_domain.insert(c);
    }
}

fn chunk(epoch: u64, text: &str) -> AppEvent {
    AppEvent::StreamChunk {
        epoch,
        text: text.to_string(),
    }
}

#[test]
fn entry_submission_navigates_with_exact_pair() {
    let mut app = App::default();
    fill_entry(&mut app, "Globex Corporation", "Market entry – LATAM");

    assert!(app.submit_entry());
    assert_eq!(app.screen, Screen::Document);

    let session = app.session.as_ref().unwrap();
    assert_eq!(session.company_name, "Globex Corporation");
    assert_eq!(session.task_domain, "Market entry – LATAM");
}

#[test]
fn empty_fields_block_navigation() {
    let mut app = App::default();
    assert!(!app.submit_entry());
    assert_eq!(app.screen, Screen::Entry);

    fill_entry(&mut app, "Globex", "");
    assert!(!app.submit_entry());
    assert!(app.session.is_none());
}

#[test]
fn final_document_equals_chunk_concatenation_for_any_boundaries() {
    let document = "# Globex\n\n## Pitch\n\n* point one\n* point two\n\nClosing paragraph.";

    // Re-run the same stream with several different chunk sizes; the result
    // must not depend on where the boundaries fall.
    for size in [1, 2, 3, 7, 16, document.len()] {
        let mut app = App::default();
        let epoch = app.begin_generate();

        let chars: Vec<char> = document.chars().collect();
        for piece in chars.chunks(size) {
            let piece: String = piece.iter().collect();
            app.apply_event(chunk(epoch, &piece));
        }
        app.apply_event(AppEvent::StreamDone { epoch });

        assert_eq!(app.document, document, "chunk size {}", size);
        assert!(!app.loading);
        assert!(!app.refine_loading);
    }
}

#[test]
fn refinement_clears_display_before_first_chunk() {
    let mut app = App::default();
    let epoch = app.begin_generate();
    app.apply_event(chunk(epoch, "original template"));
    app.apply_event(AppEvent::StreamDone { epoch });
    assert_eq!(app.display_text(), "original template");

    app.begin_refine();

    // No stale content may be visible between the clear and the first chunk.
    assert_eq!(app.display_text(), "");
    assert!(app.refine_loading);
}

#[test]
fn superseded_stream_cannot_touch_the_display() {
    let mut app = App::default();
    let first = app.begin_generate();
    app.apply_event(chunk(first, "from the first stream"));

    let second = app.begin_refine();
    app.apply_event(chunk(second, "second "));
    app.apply_event(chunk(first, "INTERLEAVED"));
    app.apply_event(chunk(second, "stream"));

    assert_eq!(app.display_text(), "second stream");

    // A stale completion must not finalize the new stream's buffer early.
    app.apply_event(AppEvent::StreamDone { epoch: first });
    assert!(app.refine_loading);
    assert_eq!(app.document, "");

    app.apply_event(AppEvent::StreamDone { epoch: second });
    assert_eq!(app.document, "second stream");
    assert!(!app.refine_loading);
}

#[test]
fn generate_failure_shows_banner_without_stuck_spinner() {
    let mut app = App::default();
    let epoch = app.begin_generate();
    app.apply_event(chunk(epoch, "partial"));
    app.apply_event(AppEvent::StreamFailed {
        epoch,
        phase: StreamPhase::Generate,
    });

    assert_eq!(app.error.as_deref(), Some(GENERATE_ERROR));
    assert!(!app.loading);
    assert_eq!(app.status(), "Error");
}

#[test]
fn refine_failure_is_scoped_and_leaves_cleared_document() {
    let mut app = App::default();
    let epoch = app.begin_generate();
    app.apply_event(chunk(epoch, "good document"));
    app.apply_event(AppEvent::StreamDone { epoch });

    let epoch = app.begin_refine();
    app.apply_event(AppEvent::StreamFailed {
        epoch,
        phase: StreamPhase::Refine,
    });

    assert_eq!(app.refine_error.as_deref(), Some(REFINE_ERROR));
    assert!(app.error.is_none());
    assert!(!app.refine_loading);
    assert_eq!(app.display_text(), "");
}

#[test]
fn leaving_the_document_screen_resets_and_strands_streams() {
    let mut app = App::default();
    fill_entry(&mut app, "Acme", "Pricing");
    app.submit_entry();
    let epoch = app.begin_generate();
    app.apply_event(chunk(epoch, "partial content"));

    app.back_to_entry();

    assert_eq!(app.screen, Screen::Entry);
    assert!(app.session.is_none());
    assert!(app.entry.company.value.is_empty());
    assert!(app.entry.task_domain.value.is_empty());

    // Chunks from the abandoned stream fall on the floor.
    app.apply_event(chunk(epoch, "late arrival"));
    assert_eq!(app.display_text(), "");
}

#[test]
fn document_screen_without_session_redirects() {
    let mut app = App::default();
    app.screen = Screen::Document;
    app.ensure_session();
    assert_eq!(app.screen, Screen::Entry);
}
