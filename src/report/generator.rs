use anyhow::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

use crate::models::Project;
use crate::report::layout::{self, Block, Document};

/// Renders report documents to files in Markdown and PDF form. Document
/// construction stays in memory; nothing touches disk until the final write.
pub struct ReportGenerator {
    output_dir: String,
}

impl ReportGenerator {
    pub fn new(output_dir: &str) -> Result<Self> {
        let path = Path::new(output_dir);
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        Ok(Self {
            output_dir: output_dir.to_string(),
        })
    }

    /// Generate the report files for one project and return their paths.
    /// The PDF conversion runs through pandoc when available; otherwise the
    /// rendered content is copied under the PDF name so a share attachment
    /// always exists.
    pub fn generate(&self, project: &Project) -> Result<(String, String)> {
        let document = layout::build_document(project);
        let markdown = render_markdown(&document);

        let stem = Document::file_stem(project);
        let epoch_millis = chrono::Utc::now().timestamp_millis();
        let md_path = format!("{}/{}_{}.md", self.output_dir, stem, epoch_millis);
        let pdf_path = format!("{}/{}_{}.pdf", self.output_dir, stem, epoch_millis);

        let mut file = File::create(&md_path)?;
        file.write_all(markdown.as_bytes())?;

        let pdf_result = Command::new("pandoc")
            .arg(&md_path)
            .arg("-o")
            .arg(&pdf_path)
            .output();

        match pdf_result {
            Ok(output) => {
                if !output.status.success() {
                    let error = String::from_utf8_lossy(&output.stderr);
                    tracing::warn!(%error, "pandoc failed, writing markdown copy");
                    self.create_markdown_copy(&md_path, &pdf_path)?;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not run pandoc, writing markdown copy");
                self.create_markdown_copy(&md_path, &pdf_path)?;
            }
        }

        tracing::debug!(pdf = %pdf_path, "report generated");
        Ok((md_path, pdf_path))
    }

    /// Copy the markdown content under the PDF name as a fallback when no
    /// converter is available.
    fn create_markdown_copy(&self, md_path: &str, pdf_path: &str) -> Result<()> {
        let content = fs::read_to_string(md_path)?;
        let mut file = File::create(pdf_path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Render the placed blocks as Markdown, top to bottom. Positions are already
/// fixed by the layout; this rendition only has to respect block order and
/// box grouping.
fn render_markdown(document: &Document) -> String {
    let mut content = String::new();

    for placed in &document.blocks {
        match &placed.block {
            Block::Title => {
                content.push_str(&format!("# {}\n", layout::ORG_NAME));
                content.push_str(&format!("## {}\n", layout::ORG_SUBTITLE));
                content.push_str(&format!("{}\n\n", layout::ORG_ADDRESS));
                content.push_str("---\n\n");
            }
            Block::LabeledRow { label, value } => {
                content.push_str(&format!("**{}** {}\n\n", label, value));
            }
            Block::BoxedText { heading, lines } => {
                content.push_str(&format!("**{}**\n\n", heading));
                for line in lines {
                    content.push_str(&format!("> {}\n", line));
                }
                content.push('\n');
            }
            Block::BulletedBox { heading, items } => {
                content.push_str(&format!("**{}**\n\n", heading));
                for group in items {
                    for (i, line) in group.iter().enumerate() {
                        if i == 0 {
                            content.push_str(&format!("- {}\n", line));
                        } else {
                            content.push_str(&format!("  {}\n", line));
                        }
                    }
                }
                content.push('\n');
            }
            Block::FooterSignatures => {
                content.push_str("---\n\n");
                content.push_str("**Sign of Consultant**");
                content.push_str("&nbsp;&nbsp;&nbsp;&nbsp;");
                content.push_str("**Sign of Client**\n");
            }
        }
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            project_id: 1,
            project_name: "Villa A".to_string(),
            project_client_id: 42,
            project_client_name: "A. Kulkarni".to_string(),
            project_contact_number: "9876543210".to_string(),
            project_type: "Residential".to_string(),
            project_description: "Two floors with a terrace garden".to_string(),
            project_time: "2025-07-26T12:00:00Z".to_string(),
            project_address: "Vijayapur".to_string(),
            project_meeting_outcome: None,
            project_worked: Some("site visit, estimate".to_string()),
        }
    }

    #[test]
    fn generates_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ReportGenerator::new(dir.path().to_str().unwrap()).unwrap();

        let (md_path, pdf_path) = generator.generate(&sample_project()).unwrap();

        assert!(Path::new(&md_path).exists());
        assert!(Path::new(&pdf_path).exists());
        assert!(md_path.ends_with(".md"));
        assert!(pdf_path.ends_with(".pdf"));

        let name = Path::new(&pdf_path).file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("Villa A_"));
    }

    #[test]
    fn markdown_carries_every_section() {
        let document = layout::build_document(&sample_project());
        let markdown = render_markdown(&document);

        assert!(markdown.contains("# VIDWAT"));
        assert!(markdown.contains("**Client ID:** 42"));
        assert!(markdown.contains("**Meeting Date:** 26/07/2025, 12:00:00 pm"));
        assert!(markdown.contains("**Description:**"));
        assert!(markdown.contains("- site visit"));
        assert!(markdown.contains("- estimate"));
        assert!(markdown.contains("Sign of Consultant"));
        assert!(!markdown.contains("Meeting Outcome:"));
    }

    #[test]
    fn creates_output_dir_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports").join("august");
        let generator = ReportGenerator::new(nested.to_str().unwrap()).unwrap();

        generator.generate(&sample_project()).unwrap();
        assert!(nested.exists());
    }
}
