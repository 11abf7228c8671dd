use chrono::DateTime;

use crate::models::Project;

// A4 page in layout units, matching the coordinates the firm's reports have
// always used.
pub const PAGE_HEIGHT: f32 = 297.0;

/// First baseline after the header rule.
pub const CONTENT_TOP: f32 = 55.0;
/// Vertical advance per labeled metadata row.
pub const ROW_STEP: f32 = 10.0;
/// Gap between sections and after each box.
pub const SECTION_GAP: f32 = 10.0;
/// Advance per wrapped text line inside a box.
pub const LINE_HEIGHT: f32 = 7.0;
/// Extra height inside a plain text box.
pub const TEXT_BOX_PADDING: f32 = 5.0;
/// Extra height inside the bulleted box (top + bottom padding).
pub const BULLET_BOX_PADDING: f32 = 12.0;
/// Gap between a heading baseline and the top edge of its text box.
pub const HEADING_TO_TEXT_BOX: f32 = 2.0;
/// Gap between the bulleted heading baseline and its box top.
pub const HEADING_TO_BULLET_BOX: f32 = 8.0;
/// Wrap column for description and outcome text.
pub const TEXT_WRAP_WIDTH: f32 = 160.0;
/// Narrower wrap column for bulleted work items.
pub const BULLET_WRAP_WIDTH: f32 = 150.0;
/// Signature captions sit this far above the bottom edge.
pub const FOOTER_OFFSET: f32 = 20.0;

/// Approximate character advance in layout units; the wrap budget for a
/// column is `width / CHAR_WIDTH` characters.
const CHAR_WIDTH: f32 = 2.0;

pub const ORG_NAME: &str = "VIDWAT";
pub const ORG_SUBTITLE: &str = "Architects and Engineers";
pub const ORG_ADDRESS: &str =
    "#33, Opp Milan Petrol Pump, Near Veer Savarkar Circle, Begum Talab Road, Vijayapur";

/// One discrete visual unit of the report.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title,
    LabeledRow { label: String, value: String },
    BoxedText { heading: String, lines: Vec<String> },
    /// Each item is one work point, already wrapped into its own line group.
    /// The first line of a group gets the bullet marker, continuation lines
    /// are indented.
    BulletedBox { heading: String, items: Vec<Vec<String>> },
    FooterSignatures,
}

/// A block with its computed vertical position. `y` is the baseline of the
/// block's first text (the heading, for boxed blocks); `height` is the drawn
/// box height where one exists, otherwise the block's own advance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub y: f32,
    pub height: f32,
    pub block: Block,
}

/// The print-ready report: an ordered sequence of placed blocks. Rendering is
/// the caller's concern; nothing here touches the filesystem.
#[derive(Debug, Clone)]
pub struct Document {
    pub blocks: Vec<PlacedBlock>,
}

impl Document {
    /// File stem for the saved artifact; the epoch suffix is appended by the
    /// generator at save time.
    pub fn file_stem(project: &Project) -> &str {
        if project.project_name.is_empty() {
            "project"
        } else {
            &project.project_name
        }
    }
}

/// Lay out one project as a single-page report. Pure: same project in, same
/// document out.
///
/// The footer is anchored to the bottom margin regardless of how tall the
/// content above grew. Content overflowing the page is not reflowed; that
/// matches the printed reports in circulation.
pub fn build_document(project: &Project) -> Document {
    let blocks = collect_blocks(project);

    // Fold the block sequence into placed blocks, accumulating the vertical
    // cursor. One extra gap separates the metadata rows from the first boxed
    // section.
    let mut placed = Vec::with_capacity(blocks.len());
    let mut y = CONTENT_TOP;
    let mut prev_was_row = false;

    for block in blocks {
        let is_row = matches!(block, Block::LabeledRow { .. });
        if prev_was_row && !is_row {
            y += SECTION_GAP;
        }
        prev_was_row = is_row;

        let (block_y, height, advance) = match &block {
            Block::Title => (0.0, CONTENT_TOP, 0.0),
            Block::LabeledRow { .. } => (y, ROW_STEP, ROW_STEP),
            Block::BoxedText { lines, .. } => {
                let box_height = lines.len() as f32 * LINE_HEIGHT + TEXT_BOX_PADDING;
                (y, box_height, HEADING_TO_TEXT_BOX + box_height + SECTION_GAP)
            }
            Block::BulletedBox { items, .. } => {
                let total_lines: usize = items.iter().map(Vec::len).sum();
                let box_height = total_lines as f32 * LINE_HEIGHT + BULLET_BOX_PADDING;
                (y, box_height, HEADING_TO_BULLET_BOX + box_height + SECTION_GAP)
            }
            Block::FooterSignatures => (PAGE_HEIGHT - FOOTER_OFFSET, 0.0, 0.0),
        };

        y += advance;
        placed.push(PlacedBlock {
            y: block_y,
            height,
            block,
        });
    }

    Document { blocks: placed }
}

fn collect_blocks(project: &Project) -> Vec<Block> {
    let mut blocks = vec![Block::Title];

    let rows = [
        ("Client ID:", project.project_client_id.to_string()),
        ("Client Name:", project.project_client_name.clone()),
        ("Contact Number:", project.project_contact_number.clone()),
        ("Address:", project.project_address.clone()),
        ("Project Name:", project.project_name.clone()),
        ("Project Type:", project.project_type.clone()),
        ("Meeting Date:", format_meeting_time(&project.project_time)),
    ];
    for (label, value) in rows {
        blocks.push(Block::LabeledRow {
            label: label.to_string(),
            value,
        });
    }

    blocks.push(Block::BoxedText {
        heading: "Description:".to_string(),
        lines: wrap_to_width(project.description_or_dash(), TEXT_WRAP_WIDTH),
    });

    if let Some(outcome) = project.meeting_outcome() {
        blocks.push(Block::BoxedText {
            heading: "Meeting Outcome:".to_string(),
            lines: wrap_to_width(outcome, TEXT_WRAP_WIDTH),
        });
    }

    let items = project.worked_items();
    if !items.is_empty() {
        blocks.push(Block::BulletedBox {
            heading: "Points to be Worked:".to_string(),
            items: items
                .iter()
                .map(|item| wrap_to_width(item, BULLET_WRAP_WIDTH))
                .collect(),
        });
    }

    blocks.push(Block::FooterSignatures);
    blocks
}

/// Locale-style rendering of the ISO 8601 meeting time, e.g.
/// "26/07/2025, 12:00:00 pm". Unparsable input passes through unchanged
/// rather than failing the whole report.
pub fn format_meeting_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%d/%m/%Y, %-I:%M:%S %P").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Greedy word wrap to a column width in layout units. Words longer than the
/// line budget are hard-split.
pub fn wrap_to_width(text: &str, width_units: f32) -> Vec<String> {
    let budget = (width_units / CHAR_WIDTH) as usize;
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let word_len = word.chars().count();
            let needed = if current.is_empty() {
                word_len
            } else {
                current.chars().count() + 1 + word_len
            };

            if needed <= budget {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if word_len <= budget {
                current.push_str(word);
            } else {
                // Hard-split an oversized word across lines.
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(budget) {
                    lines.push(chunk.iter().collect());
                }
                if let Some(last) = lines.pop() {
                    current = last;
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_project() -> Project {
        Project {
            project_id: 1,
            project_name: "Villa A".to_string(),
            project_client_id: 42,
            project_client_name: "A. Kulkarni".to_string(),
            project_contact_number: "9876543210".to_string(),
            project_type: "Residential".to_string(),
            project_description: String::new(),
            project_time: "2025-07-26T12:00:00Z".to_string(),
            project_address: "Vijayapur".to_string(),
            project_meeting_outcome: None,
            project_worked: None,
        }
    }

    #[test]
    fn minimal_project_yields_title_rows_dash_box_footer() {
        let doc = build_document(&base_project());

        assert_eq!(doc.blocks.len(), 10);
        assert!(matches!(doc.blocks[0].block, Block::Title));
        for placed in &doc.blocks[1..8] {
            assert!(matches!(placed.block, Block::LabeledRow { .. }));
        }
        match &doc.blocks[8].block {
            Block::BoxedText { heading, lines } => {
                assert_eq!(heading, "Description:");
                assert_eq!(lines, &vec!["-".to_string()]);
            }
            other => panic!("expected description box, got {other:?}"),
        }
        assert!(matches!(doc.blocks[9].block, Block::FooterSignatures));
    }

    #[test]
    fn rows_and_description_land_at_fixed_offsets() {
        let doc = build_document(&base_project());

        // Seven rows stepping by 10 from the content top.
        for (i, placed) in doc.blocks[1..8].iter().enumerate() {
            assert_eq!(placed.y, CONTENT_TOP + i as f32 * ROW_STEP);
        }

        // Description heading: one extra gap after the last row.
        let description = &doc.blocks[8];
        assert_eq!(description.y, 135.0);
        // One wrapped line: 1 * 7 + 5.
        assert_eq!(description.height, 12.0);
    }

    #[test]
    fn footer_is_anchored_to_the_bottom_margin() {
        let mut project = base_project();
        project.project_description = "word ".repeat(200);
        let doc = build_document(&project);

        let footer = doc.blocks.last().unwrap();
        assert!(matches!(footer.block, Block::FooterSignatures));
        assert_eq!(footer.y, PAGE_HEIGHT - FOOTER_OFFSET);
    }

    #[test]
    fn outcome_box_follows_description() {
        let mut project = base_project();
        project.project_meeting_outcome = Some("Approved plan".to_string());
        let doc = build_document(&project);

        let outcome = &doc.blocks[9];
        match &outcome.block {
            Block::BoxedText { heading, .. } => assert_eq!(heading, "Meeting Outcome:"),
            other => panic!("expected outcome box, got {other:?}"),
        }
        // Description heading 135, box top 137, height 12, next gap 10.
        assert_eq!(outcome.y, 159.0);
    }

    #[test]
    fn blank_worked_list_emits_no_bulleted_box() {
        let mut project = base_project();
        project.project_worked = Some("  ,  ".to_string());
        let doc = build_document(&project);

        assert!(
            !doc.blocks
                .iter()
                .any(|p| matches!(p.block, Block::BulletedBox { .. }))
        );
    }

    #[test]
    fn bulleted_box_wraps_each_item_independently() {
        let mut project = base_project();
        project.project_worked = Some("electrical layout, plumbing".to_string());
        let doc = build_document(&project);

        let bulleted = doc
            .blocks
            .iter()
            .find(|p| matches!(p.block, Block::BulletedBox { .. }))
            .unwrap();
        match &bulleted.block {
            Block::BulletedBox { items, .. } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0], vec!["electrical layout".to_string()]);
                assert_eq!(items[1], vec!["plumbing".to_string()]);
            }
            _ => unreachable!(),
        }
        // Two single-line items: 2 * 7 + 12.
        assert_eq!(bulleted.height, 26.0);
        assert_eq!(bulleted.y, 159.0);
    }

    #[test]
    fn build_document_is_deterministic() {
        let mut project = base_project();
        project.project_worked = Some("a, b".to_string());
        let first = build_document(&project);
        let second = build_document(&project);
        assert_eq!(first.blocks, second.blocks);
    }

    #[test]
    fn meeting_time_formats_and_falls_back() {
        assert_eq!(
            format_meeting_time("2025-07-26T12:00:00Z"),
            "26/07/2025, 12:00:00 pm"
        );
        assert_eq!(
            format_meeting_time("2025-07-26T09:05:00Z"),
            "26/07/2025, 9:05:00 am"
        );
        assert_eq!(format_meeting_time("next tuesday"), "next tuesday");
    }

    #[test]
    fn wrap_respects_column_budget() {
        let text = "one two three four five six seven eight nine ten";
        for line in wrap_to_width(text, 40.0) {
            assert!(line.chars().count() <= 20);
        }
        assert_eq!(wrap_to_width("short", 160.0), vec!["short".to_string()]);
    }

    #[test]
    fn wrap_hard_splits_oversized_words() {
        let word = "x".repeat(50);
        let lines = wrap_to_width(&word, 40.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 20);
        assert_eq!(lines[2].len(), 10);
    }

    #[test]
    fn file_stem_falls_back_for_unnamed_projects() {
        let mut project = base_project();
        assert_eq!(Document::file_stem(&project), "Villa A");
        project.project_name.clear();
        assert_eq!(Document::file_stem(&project), "project");
    }
}
