use anyhow::{anyhow, Context, Result};
use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, TableCellContent, TableChild,
    TableRowChild,
};
use log::debug;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFileKind {
    PlainText,
    Docx,
}

/// Decide how an uploaded file is handled, by extension. `None` means the
/// file is rejected without touching the current transcript.
pub fn classify_transcript_file(path: &Path) -> Option<TranscriptFileKind> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "txt" => Some(TranscriptFileKind::PlainText),
        "docx" => Some(TranscriptFileKind::Docx),
        _ => None,
    }
}

pub fn extract_transcript(path: &Path, kind: TranscriptFileKind) -> Result<String> {
    match kind {
        TranscriptFileKind::PlainText => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        TranscriptFileKind::Docx => {
            let bytes =
                std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            extract_docx_text(&bytes)
        }
    }
}

/// Extract the raw text of a .docx document: paragraph text in document
/// order, including paragraphs nested in tables.
fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let docx = read_docx(bytes).map_err(|e| anyhow!("Failed to parse document: {:?}", e))?;

    let mut text = String::new();
    for child in &docx.document.children {
        collect_document_child_text(child, &mut text);
    }

    debug!("Extracted {} chars of document text", text.len());
    Ok(text.trim_end().to_string())
}

fn collect_document_child_text(child: &DocumentChild, out: &mut String) {
    match child {
        DocumentChild::Paragraph(paragraph) => collect_paragraph_text(paragraph, out),
        DocumentChild::Table(table) => {
            for row_child in &table.rows {
                match row_child {
                    TableChild::TableRow(row) => {
                        for cell_child in &row.cells {
                            match cell_child {
                                TableRowChild::TableCell(cell) => {
                                    for content in &cell.children {
                                        if let TableCellContent::Paragraph(paragraph) = content {
                                            collect_paragraph_text(paragraph, out);
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

fn collect_paragraph_text(paragraph: &Paragraph, out: &mut String) {
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(text) => out.push_str(&text.text),
                    RunChild::Tab(_) => out.push('\t'),
                    RunChild::Break(_) => out.push('\n'),
                    _ => {}
                }
            }
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};
    use std::io::Write;

    #[test]
    fn test_classify_by_extension_case_insensitive() {
        assert_eq!(
            classify_transcript_file(Path::new("notes.txt")),
            Some(TranscriptFileKind::PlainText)
        );
        assert_eq!(
            classify_transcript_file(Path::new("Notes.TXT")),
            Some(TranscriptFileKind::PlainText)
        );
        assert_eq!(
            classify_transcript_file(Path::new("meeting.docx")),
            Some(TranscriptFileKind::Docx)
        );
    }

    #[test]
    fn test_classify_rejects_other_types() {
        assert_eq!(classify_transcript_file(Path::new("report.pdf")), None);
        assert_eq!(classify_transcript_file(Path::new("no_extension")), None);
    }

    #[test]
    fn test_extract_plain_text_returns_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let content = "Alice: hello\nBob: hi there\n";
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let text = extract_transcript(&path, TranscriptFileKind::PlainText).unwrap();
        assert_eq!(text, content);
    }

    #[test]
    fn test_extract_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(extract_transcript(&path, TranscriptFileKind::PlainText).is_err());
    }

    #[test]
    fn test_extract_docx_paragraph_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meeting.docx");
        let file = std::fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Standup notes")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Action items follow")))
            .build()
            .pack(file)
            .unwrap();

        let text = extract_transcript(&path, TranscriptFileKind::Docx).unwrap();
        assert_eq!(text, "Standup notes\nAction items follow");
    }

    #[test]
    fn test_extract_invalid_docx_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert!(extract_transcript(&path, TranscriptFileKind::Docx).is_err());
    }
}
