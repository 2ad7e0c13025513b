//! OSLC paging.
//!
//! Paging is active when the client asks for it (`oslc.paging=true`) or
//! gives a positive page size. An active page defaults to 50 members,
//! page 1. The `oslc:ResponseInfo` resource always links a next page at
//! `pageNo + 1`; whether that page holds any members is not checked.

use oxrdf::NamedNodeRef;

use crate::graph::{iri, GraphError, ResourceGraph};
use crate::naming::ItemTypeName;
use crate::vocab::{dcterms, oslc};

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Paging parameters as the client sent them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagingParams {
    pub paging: bool,
    pub page_size: Option<u32>,
    pub page_no: Option<u32>,
}

/// An effective page, only obtainable through [`PagingParams::effective`].
/// `number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    size: u32,
    number: u32,
}

impl PagingParams {
    /// The page to load, or `None` when paging is off.
    pub fn effective(&self) -> Option<Page> {
        let size = self.page_size.filter(|&s| s > 0);
        if !self.paging && size.is_none() {
            return None;
        }
        Some(Page {
            size: size.unwrap_or(DEFAULT_PAGE_SIZE),
            number: self.page_no.filter(|&n| n > 0).unwrap_or(1),
        })
    }
}

impl Page {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Members to skip before this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.size)
    }

    pub fn next(&self) -> Page {
        Page {
            size: self.size,
            number: self.number.saturating_add(1),
        }
    }

    /// `base` with this page's paging parameters.
    pub fn url(&self, base: &str) -> String {
        format!(
            "{base}?oslc.paging=true&oslc.pageSize={}&oslc.pageNo={}",
            self.size, self.number
        )
    }

    /// Add an `oslc:ResponseInfo` for this page to `graph` and link it from
    /// `resource` with `oslc:responseInfo`.
    pub fn add_response_info(
        &self,
        graph: &mut ResourceGraph,
        resource: &str,
        item_type: &ItemTypeName,
    ) -> Result<(), GraphError> {
        let subject = iri(resource)?;
        let info = iri(self.url(resource))?;
        graph.insert_type(info.clone(), NamedNodeRef::new_unchecked(oslc::RESPONSE_INFO));
        graph.insert_literal(
            info.clone(),
            NamedNodeRef::new_unchecked(dcterms::TITLE),
            format!("Query Results for {}", item_type.url_name()),
        );
        graph.insert(
            info.clone(),
            NamedNodeRef::new_unchecked(oslc::NEXT_PAGE),
            iri(self.next().url(resource))?,
        );
        graph.insert(subject, NamedNodeRef::new_unchecked(oslc::RESPONSE_INFO_PROP), info);
        Ok(())
    }
}
