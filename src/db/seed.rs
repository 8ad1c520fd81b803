//! Sample catalog for demos and tests.

use tracing::info;

use super::Database;
use crate::node::{NewNode, NodeGateway, NodeRepository, NodeType};
use crate::Result;

const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const PPTX: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

struct SeedEntry {
    name: &'static str,
    node_type: NodeType,
    size: Option<i64>,
    mime_type: Option<&'static str>,
    children: &'static [SeedEntry],
}

const fn folder(name: &'static str, children: &'static [SeedEntry]) -> SeedEntry {
    SeedEntry {
        name,
        node_type: NodeType::Folder,
        size: None,
        mime_type: None,
        children,
    }
}

const fn file(name: &'static str, size: i64, mime_type: &'static str) -> SeedEntry {
    SeedEntry {
        name,
        node_type: NodeType::File,
        size: Some(size),
        mime_type: Some(mime_type),
        children: &[],
    }
}

const CATALOG: &[SeedEntry] = &[
    folder(
        "Documents",
        &[
            folder(
                "Work",
                &[
                    folder(
                        "2024",
                        &[
                            folder(
                                "Q1",
                                &[
                                    file("january.docx", 65_536, DOCX),
                                    file("february.docx", 73_728, DOCX),
                                ],
                            ),
                            folder("Q2", &[]),
                            file("budget.xlsx", 131_072, XLSX),
                        ],
                    ),
                    folder("2023", &[]),
                    file("presentation.pptx", 2_097_152, PPTX),
                ],
            ),
            folder(
                "Personal",
                &[
                    folder("Photos", &[]),
                    folder("Videos", &[]),
                    file("notes.txt", 4_096, "text/plain"),
                ],
            ),
            file("report.pdf", 524_288, "application/pdf"),
        ],
    ),
    folder(
        "Projects",
        &[
            folder(
                "WebApp",
                &[
                    folder(
                        "src",
                        &[
                            folder("components", &[]),
                            folder("utils", &[]),
                            file("index.ts", 1_024, "text/typescript"),
                        ],
                    ),
                    folder("tests", &[]),
                    file("package.json", 2_048, "application/json"),
                    file("README.md", 8_192, "text/markdown"),
                ],
            ),
            folder("MobileApp", &[]),
        ],
    ),
    folder(
        "Downloads",
        &[
            file("installer.exe", 10_485_760, "application/x-msdownload"),
            file("image.png", 1_048_576, "image/png"),
            folder("Temp", &[]),
        ],
    ),
];

/// Replace the catalog contents with the sample tree.
///
/// Returns the number of nodes inserted.
pub async fn seed(db: &Database) -> Result<u64> {
    let repo = NodeRepository::new(db.pool());

    let removed = repo.delete_all().await?;
    info!(removed, "Cleared catalog before seeding");

    let mut inserted = 0;
    let mut pending: Vec<(&SeedEntry, Option<String>)> =
        CATALOG.iter().rev().map(|entry| (entry, None)).collect();

    while let Some((entry, parent_id)) = pending.pop() {
        let mut new_node = NewNode::new(entry.name, entry.node_type);
        new_node.parent_id = parent_id;
        new_node.size = entry.size;
        new_node.mime_type = entry.mime_type.map(str::to_string);

        let node = repo.create(&new_node).await?;
        inserted += 1;

        for child in entry.children.iter().rev() {
            pending.push((child, Some(node.id.clone())));
        }
    }

    info!(inserted, "Seeded sample catalog");
    Ok(inserted)
}
