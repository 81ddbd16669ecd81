use audioscribe::core::services::artifacts::render_artifacts;
use chrono::Local;

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn hello_world_round_trips_through_both_artifacts() {
    let (txt, pdf) = render_artifacts("hello world", Local::now(), "voice_1_100")
        .expect("render artifacts");

    assert_eq!(txt.file_name, "transcription_voice_1_100.txt");
    assert_eq!(pdf.file_name, "transcription_voice_1_100.pdf");

    let text = String::from_utf8(txt.bytes).expect("text artifact is UTF-8");
    assert!(text.contains("hello world"));

    assert!(pdf.bytes.starts_with(b"%PDF"));
    let extracted = pdf_extract::extract_text_from_mem(&pdf.bytes).expect("extract PDF text");
    assert!(normalize_whitespace(&extracted).contains("hello world"));
}

#[test]
fn both_artifacts_carry_the_same_transcript() {
    let transcript = "The quick brown fox jumps over the lazy dog.";
    let (txt, pdf) = render_artifacts(transcript, Local::now(), "audio_5_55")
        .expect("render artifacts");

    let text = String::from_utf8(txt.bytes).expect("text artifact is UTF-8");
    assert!(text.contains(transcript));

    let extracted = pdf_extract::extract_text_from_mem(&pdf.bytes).expect("extract PDF text");
    assert!(normalize_whitespace(&extracted).contains(transcript));
}

#[test]
fn text_artifact_keeps_the_transcript_verbatim_under_a_header() {
    let (txt, _) = render_artifacts("line one\nline two", Local::now(), "voice_3_30")
        .expect("render artifacts");
    let text = String::from_utf8(txt.bytes).expect("text artifact is UTF-8");

    assert!(text.starts_with("Audio Transcription\nDate: "));
    assert!(text.ends_with("line one\nline two\n"));
}

#[test]
fn long_transcripts_paginate_across_pdf_pages() {
    let transcript = "lorem ipsum dolor sit amet consectetur adipiscing elit\n".repeat(120);
    let (_, pdf) = render_artifacts(&transcript, Local::now(), "audio_9_99")
        .expect("render artifacts");

    let doc = lopdf::Document::load_mem(&pdf.bytes).expect("well-formed PDF");
    assert!(doc.get_pages().len() > 1, "120 lines must not fit one page");
}

#[test]
fn empty_transcript_still_renders_both_artifacts() {
    let (txt, pdf) = render_artifacts("", Local::now(), "voice_4_40").expect("render artifacts");

    assert!(!txt.bytes.is_empty());
    assert!(pdf.bytes.starts_with(b"%PDF"));
    let doc = lopdf::Document::load_mem(&pdf.bytes).expect("well-formed PDF");
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn non_latin1_characters_degrade_in_pdf_but_stay_verbatim_in_txt() {
    let transcript = "hello 日本語 world";
    let (txt, pdf) = render_artifacts(transcript, Local::now(), "voice_6_60")
        .expect("render artifacts");

    let text = String::from_utf8(txt.bytes).expect("text artifact is UTF-8");
    assert!(text.contains("hello 日本語 world"));

    let extracted = pdf_extract::extract_text_from_mem(&pdf.bytes).expect("extract PDF text");
    let normalized = normalize_whitespace(&extracted);
    assert!(normalized.contains("hello ??? world"));
}
