use crate::errors::MyError;
use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const TITLE_SIZE: i64 = 16;
const META_SIZE: i64 = 9;
const BODY_SIZE: i64 = 11;
const LEADING: i64 = 14;
const WRAP_COLUMNS: usize = 90;

/// An in-memory output document, sent to the user and then discarded.
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Render the transcript into its text and PDF artifacts.
///
/// Both carry the same transcript; the text file keeps it verbatim, the PDF
/// lays it out for reading.
pub fn render_artifacts(
    transcript: &str,
    stamp: DateTime<Local>,
    key: &str,
) -> Result<(Artifact, Artifact), MyError> {
    let txt = Artifact {
        file_name: format!("transcription_{key}.txt"),
        bytes: render_text(transcript, stamp).into_bytes(),
    };
    let pdf = Artifact {
        file_name: format!("transcription_{key}.pdf"),
        bytes: render_pdf(transcript, stamp)?,
    };
    Ok((txt, pdf))
}

fn render_text(transcript: &str, stamp: DateTime<Local>) -> String {
    format!(
        "Audio Transcription\nDate: {}\n{}\n\n{}\n",
        stamp.format(DATE_FORMAT),
        "-".repeat(50),
        transcript
    )
}

fn render_pdf(transcript: &str, stamp: DateTime<Local>) -> Result<Vec<u8>, MyError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let body_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let title_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => body_font_id, "F2" => title_font_id },
    });

    let lines = wrap_lines(transcript, WRAP_COLUMNS);
    let mut kids: Vec<Object> = Vec::new();
    let mut idx = 0;
    let mut page_no = 0;

    loop {
        let mut ops = vec![Operation::new("BT", vec![])];
        let mut y = PAGE_HEIGHT - MARGIN;

        if page_no == 0 {
            ops.push(Operation::new("Tf", vec!["F2".into(), TITLE_SIZE.into()]));
            ops.push(Operation::new("Td", vec![MARGIN.into(), y.into()]));
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(to_latin1("Audio Transcription"))],
            ));
            ops.push(Operation::new("Tf", vec!["F1".into(), META_SIZE.into()]));
            ops.push(Operation::new("Td", vec![0.into(), (-22i64).into()]));
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(to_latin1(&format!(
                    "Date: {}",
                    stamp.format(DATE_FORMAT)
                )))],
            ));
            ops.push(Operation::new("Tf", vec!["F1".into(), BODY_SIZE.into()]));
            ops.push(Operation::new("Td", vec![0.into(), (-24i64).into()]));
            y -= 46;
        } else {
            ops.push(Operation::new("Tf", vec!["F1".into(), BODY_SIZE.into()]));
            ops.push(Operation::new("Td", vec![MARGIN.into(), y.into()]));
        }

        ops.push(Operation::new("TL", vec![LEADING.into()]));

        let mut first_line_on_page = true;
        while idx < lines.len() && y >= MARGIN {
            if !first_line_on_page {
                ops.push(Operation::new("T*", vec![]));
            }
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(to_latin1(&lines[idx]))],
            ));
            first_line_on_page = false;
            idx += 1;
            y -= LEADING;
        }

        ops.push(Operation::new("ET", vec![]));

        let content = Content { operations: ops };
        let encoded = content
            .encode()
            .map_err(|e| MyError::Render(format!("failed to encode PDF content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());

        page_no += 1;
        if idx >= lines.len() {
            break;
        }
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| MyError::Render(format!("failed to serialize PDF: {e}")))?;
    Ok(buffer)
}

// Helvetica carries no glyphs beyond Latin-1; anything else degrades to '?'.
fn to_latin1(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect()
}

fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end();
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
            while current.chars().count() > max_chars {
                let head: String = current.chars().take(max_chars).collect();
                let rest: String = current.chars().skip(max_chars).collect();
                lines.push(head);
                current = rest;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
