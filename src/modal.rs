//! Which dialogs are open, and the contact form draft behind one of them.

use crate::catalog::{Catalog, ProjectRecord};
use crate::error::{PortfolioError, Result};

/// One visible dialog. [`ModalState::layers`] lists them bottom to top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalView<'a> {
    Project(&'a ProjectRecord),
    Contact,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A contact form submission that passed validation. Nothing dispatches it
/// over the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PortfolioError::InvalidContact { field: "name" });
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(PortfolioError::InvalidContact { field: "email" });
        }
        if self.message.trim().is_empty() {
            return Err(PortfolioError::InvalidContact { field: "message" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModalState {
    /// Catalog index of the open project.
    active: Option<usize>,
    contact_open: bool,
    draft: ContactDraft,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the project modal for `id`. An unknown id leaves no project open.
    pub fn open_project(&mut self, catalog: &Catalog, id: &str) -> Result<()> {
        match catalog.index_of(id) {
            Some(index) => {
                self.active = Some(index);
                log::info!("opened project `{id}`");
                Ok(())
            }
            None => {
                self.active = None;
                let err = PortfolioError::NotFound { id: id.to_string() };
                log::warn!("{err}");
                Err(err)
            }
        }
    }

    pub fn close_project(&mut self) {
        self.active = None;
    }

    pub fn open_contact(&mut self) {
        self.contact_open = true;
    }

    pub fn close_contact(&mut self) {
        self.contact_open = false;
    }

    /// Close the top-most dialog. Returns false when nothing was open.
    pub fn dismiss_top(&mut self) -> bool {
        if self.contact_open {
            self.close_contact();
            true
        } else if self.active.is_some() {
            self.close_project();
            true
        } else {
            false
        }
    }

    pub fn active_project<'a>(&self, catalog: &'a Catalog) -> Option<&'a ProjectRecord> {
        self.active.and_then(|i| catalog.records().get(i))
    }

    pub fn is_contact_open(&self) -> bool {
        self.contact_open
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ContactDraft {
        &mut self.draft
    }

    /// Validate and accept the draft. On success the draft is cleared and
    /// the contact dialog closes; on failure both are left as they were.
    pub fn submit_contact(&mut self) -> Result<ContactSubmission> {
        self.draft.validate()?;
        let draft = std::mem::take(&mut self.draft);
        log::info!(
            "contact message from {} <{}> ({} chars)",
            draft.name.trim(),
            draft.email.trim(),
            draft.message.chars().count()
        );
        self.close_contact();
        Ok(ContactSubmission {
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            message: draft.message,
        })
    }

    /// Visible dialogs, bottom to top. Empty when no modal is shown.
    pub fn layers<'a>(&self, catalog: &'a Catalog) -> Vec<ModalView<'a>> {
        let mut layers = Vec::with_capacity(2);
        if let Some(record) = self.active_project(catalog) {
            layers.push(ModalView::Project(record));
        }
        if self.contact_open {
            layers.push(ModalView::Contact);
        }
        layers
    }
}
