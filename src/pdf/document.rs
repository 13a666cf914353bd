use crate::error::SplitError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Catalog entries that point into the source page tree and would dangle in
/// the extracted document.
const PAGE_TREE_INDEXES: [&[u8]; 4] = [b"Outlines", b"Dests", b"PageLabels", b"OpenAction"];

const MAX_TREE_DEPTH: usize = 64;

pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

/// Outcome of copying a page sequence out of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionResult {
    pub pages_requested: usize,
    pub pages_written: usize,
    pub source_pages: u32,
    /// First requested page that lies past the end of the source. Extraction
    /// stops there and keeps what it already collected.
    pub truncated_at: Option<u32>,
}

impl ExtractionResult {
    pub fn truncated(&self) -> bool {
        self.truncated_at.is_some()
    }
}

pub struct Extraction {
    pub document: Document,
    pub result: ExtractionResult,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SplitError> {
        let path = path.as_ref();
        let doc = Document::load(path).map_err(|source| SplitError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = PdfDocument {
            doc,
            path: path.display().to_string(),
        };
        info!(path = %doc.path, pages = doc.page_count(), "opened source PDF");
        Ok(doc)
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Copy `pages` (1-based, in order, duplicates allowed) into a new
    /// document. Stops at the first page past the end of the source.
    pub fn extract_pages(&self, pages: &[u32]) -> Result<Extraction, SplitError> {
        let all_pages = self.page_ids();
        let source_pages = all_pages.len() as u32;

        let mut selected = Vec::with_capacity(pages.len());
        let mut truncated_at = None;
        for &page in pages {
            let index = page.checked_sub(1).map(|i| i as usize);
            match index.and_then(|i| all_pages.get(i)) {
                Some(&(_, id)) => selected.push(id),
                None => {
                    warn!(
                        path = %self.path,
                        page,
                        source_pages,
                        collected = selected.len(),
                        "range exceeded page count; output will contain pages collected so far"
                    );
                    truncated_at = Some(page);
                    break;
                }
            }
        }

        let document = build_document(&self.doc, &selected)?;
        let result = ExtractionResult {
            pages_requested: pages.len(),
            pages_written: selected.len(),
            source_pages,
            truncated_at,
        };
        debug!(?result, "extracted pages");

        Ok(Extraction { document, result })
    }

    /// Serialize `doc` and write it to `path`. Nothing is written when the
    /// parent directory is missing, the path is unwritable or encoding fails.
    pub fn write_output<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<(), SplitError> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(SplitError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("output directory {} does not exist", parent.display()),
                ),
            });
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| SplitError::Encode(e.to_string()))?;

        std::fs::write(path, &bytes).map_err(|source| SplitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote output PDF");
        Ok(())
    }
}

/// Build a copy of `source` whose flat page tree holds exactly `selected`, in
/// order. Repeated pages get their own page object sharing the original
/// content and resources.
fn build_document(source: &Document, selected: &[ObjectId]) -> Result<Document, SplitError> {
    let mut doc = source.clone();
    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let pages_id = doc.get_dictionary(root_id)?.get(b"Pages")?.as_reference()?;

    let mut seen = BTreeSet::new();
    let mut kids = Vec::with_capacity(selected.len());
    for &page_id in selected {
        let mut page = source.get_dictionary(page_id)?.clone();
        for key in INHERITABLE {
            if page.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source, &page, key) {
                page.set(key, value);
            }
        }
        page.set("Parent", Object::Reference(pages_id));

        let id = if seen.insert(page_id) {
            doc.objects.insert(page_id, Object::Dictionary(page));
            page_id
        } else {
            doc.add_object(page)
        };
        kids.push(Object::Reference(id));
    }

    let count = kids.len() as i64;
    let pages = doc.get_dictionary_mut(pages_id)?;
    pages.set("Kids", Object::Array(kids));
    pages.set("Count", Object::Integer(count));

    let catalog = doc.get_dictionary_mut(root_id)?;
    for key in PAGE_TREE_INDEXES {
        catalog.remove(key);
    }

    let pruned = doc.prune_objects();
    debug!(pruned = pruned.len(), pages = selected.len(), "rebuilt page tree");
    Ok(doc)
}

fn inherited_attribute(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(|p| p.as_reference()).ok();
    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(|p| p.as_reference()).ok();
    }
    None
}
