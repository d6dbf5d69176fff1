//! Session - the UI state machine over a catalog
//!
//! ```text
//!            toggle_mode (clears search)
//!   Browse ◀──────────────────────────────▶ Edit
//!     │                                       │
//!     │ activate                              │ activate / open_add
//!     ▼                                       ▼
//!   Detail ── close_detail ──▶ ·            Form ── request_delete ──▶ ConfirmDelete
//!                                             ▲                          │     │
//!                                             └──────── cancel_delete ───┘     │
//!                                      submit / close_form / confirm_delete ───┘
//! ```
//!
//! Every state change that mutates the catalog is funneled through
//! [`Catalog`]; failures become a [`Notice`] in addition to being returned.

use crate::catalog::Catalog;
use crate::config::{CatalogConfig, RenderConfig};
use crate::error::{CatalogError, CatalogResult};
use crate::form::{FormMode, ProductForm, Submission};
use crate::notice::{Notice, DEFAULT_NOTICE_TTL};
use crate::query::filter_by_search;
use crate::view::{project, route, ItemEvent, Mode, ModeChrome, RenderOptions, Route, ViewItem};
use pertes_model::ProductId;
use pertes_store::StorageSlot;
use std::time::{Duration, Instant};

/// Modal overlay currently open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Large barcode of one product
    Detail(ProductId),
    /// Add or edit form
    Form(ProductForm),
    /// Deletion confirmation; the form comes back on cancel
    ConfirmDelete {
        form: ProductForm,
        product_name: String,
    },
}

/// Everything needed to draw the large barcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeDetail {
    /// Product shown
    pub id: ProductId,
    /// Caption above the barcode
    pub name: String,
    /// Barcode text to encode
    pub barcode: String,
    /// Large-size render options
    pub options: RenderOptions,
}

/// Interactive state over a catalog
#[derive(Debug)]
pub struct Session<S> {
    catalog: Catalog<S>,
    mode: Mode,
    query: String,
    overlay: Option<Overlay>,
    notice: Option<(Notice, Instant)>,
    render: RenderConfig,
    notice_ttl: Duration,
}

impl<S: StorageSlot> Session<S> {
    /// Start a browse-mode session with default settings
    #[must_use]
    pub fn new(catalog: Catalog<S>) -> Self {
        Self {
            catalog,
            mode: Mode::Browse,
            query: String::new(),
            overlay: None,
            notice: None,
            render: RenderConfig::default(),
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }

    /// Start a session using the render and notice settings of `config`
    #[must_use]
    pub fn with_config(catalog: Catalog<S>, config: &CatalogConfig) -> Self {
        Self {
            render: config.render,
            notice_ttl: config.notice_ttl(),
            ..Self::new(catalog)
        }
    }

    /// Underlying catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    /// Current mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Global controls for the current mode
    #[inline]
    #[must_use]
    pub fn chrome(&self) -> ModeChrome {
        self.mode.chrome()
    }

    /// Active search query
    #[inline]
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Open overlay, if any
    #[inline]
    #[must_use]
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Switch between browse and edit; the search query does not survive
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.query.clear();
        tracing::debug!(mode = ?self.mode, "mode switched");
        self.mode
    }

    /// Switch to `mode` if not already there
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.toggle_mode();
        }
    }

    /// Replace the search query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Items currently shown: search filter, then mode projection and sort
    #[must_use]
    pub fn view(&self) -> Vec<ViewItem> {
        project(filter_by_search(self.catalog.products(), &self.query), self.mode)
    }

    /// Render options for list items
    #[inline]
    #[must_use]
    pub fn list_options(&self) -> RenderOptions {
        RenderOptions::list(&self.render)
    }

    /// Dispatch an event on a shown item
    ///
    /// Items not in the current view are ignored.
    ///
    /// # Errors
    /// Returns the store error if a visibility toggle could not be persisted
    pub fn handle(&mut self, id: &ProductId, event: ItemEvent) -> CatalogResult<Option<Route>> {
        let Some(item) = self.view().into_iter().find(|item| &item.id == id) else {
            return Ok(None);
        };
        let Some(target) = route(self.mode, &item, event) else {
            return Ok(None);
        };

        match &target {
            Route::ShowBarcode(id) => {
                self.open_detail(id);
            }
            Route::OpenEditor(id) => {
                self.open_edit(id);
            }
            Route::ToggleVisibility(id) => {
                let result = self.catalog.toggle_visibility(id);
                self.surface(result.map_err(CatalogError::from))?;
            }
        }
        Ok(Some(target))
    }

    /// Open the large barcode for `id`
    pub fn open_detail(&mut self, id: &ProductId) -> Option<BarcodeDetail> {
        let detail = self.detail(id)?;
        self.overlay = Some(Overlay::Detail(id.clone()));
        Some(detail)
    }

    /// Large barcode data for `id`
    #[must_use]
    pub fn detail(&self, id: &ProductId) -> Option<BarcodeDetail> {
        let product = self.catalog.get(id)?;
        Some(BarcodeDetail {
            id: id.clone(),
            name: product.name().to_string(),
            barcode: product.barcode().to_string(),
            options: RenderOptions::detail(&self.render),
        })
    }

    /// Dismiss the barcode detail
    pub fn close_detail(&mut self) {
        if matches!(self.overlay, Some(Overlay::Detail(_))) {
            self.overlay = None;
        }
    }

    /// Open an empty add form; only available in edit mode
    pub fn open_add(&mut self) -> bool {
        if !self.chrome().show_add {
            return false;
        }
        self.overlay = Some(Overlay::Form(ProductForm::add()));
        true
    }

    /// Open the edit form for `id`
    pub fn open_edit(&mut self, id: &ProductId) -> bool {
        let Some(product) = self.catalog.get(id) else {
            return false;
        };
        self.overlay = Some(Overlay::Form(ProductForm::edit(product)));
        true
    }

    /// Open form, if any
    pub fn form_mut(&mut self) -> Option<&mut ProductForm> {
        match &mut self.overlay {
            Some(Overlay::Form(form)) => Some(form),
            _ => None,
        }
    }

    /// Close the form without saving
    pub fn close_form(&mut self) {
        if matches!(self.overlay, Some(Overlay::Form(_))) {
            self.overlay = None;
        }
    }

    /// Fill in the open form and save it
    ///
    /// On a validation failure the form stays open with the field flagged.
    /// Once validation passes the form closes, whether or not the write is
    /// accepted by storage. Without an open form this does nothing.
    ///
    /// # Errors
    /// - `CatalogError::Validation` if the inputs are rejected
    /// - `CatalogError::Store` if the change could not be persisted
    pub fn submit_form(&mut self, name: &str, barcode: &str) -> CatalogResult<()> {
        let products = self.catalog.products();
        let Some(Overlay::Form(form)) = &mut self.overlay else {
            return Ok(());
        };
        form.set_name(name);
        form.set_barcode(barcode);

        let submission = match form.validate(products) {
            Ok(submission) => submission,
            Err(e) => return self.surface(Err(CatalogError::from(e))),
        };

        self.overlay = None;
        let result = self.apply(submission);
        self.surface(result)
    }

    fn apply(&mut self, submission: Submission) -> CatalogResult<()> {
        let Submission {
            mode,
            name,
            barcode,
        } = submission;
        match mode {
            FormMode::Add => self.catalog.add_product(&name, &barcode).map(drop)?,
            FormMode::Edit(id) => self.catalog.rename_or_recode(&id, &name, &barcode)?,
        }
        Ok(())
    }

    /// Ask for confirmation before deleting the product being edited
    pub fn request_delete(&mut self) -> bool {
        let Some(Overlay::Form(form)) = self.overlay.take() else {
            return false;
        };
        let FormMode::Edit(id) = form.mode() else {
            self.overlay = Some(Overlay::Form(form));
            return false;
        };
        let Some(product_name) = self.catalog.get(id).map(|p| p.name().to_string()) else {
            self.overlay = Some(Overlay::Form(form));
            return false;
        };
        self.overlay = Some(Overlay::ConfirmDelete { form, product_name });
        true
    }

    /// Back out of the deletion prompt to the form
    pub fn cancel_delete(&mut self) {
        if let Some(Overlay::ConfirmDelete { form, .. }) = self.overlay.take() {
            self.overlay = Some(Overlay::Form(form));
        }
    }

    /// Delete the product named in the prompt and close prompt and form
    ///
    /// # Errors
    /// Returns the store error if the deletion could not be persisted
    pub fn confirm_delete(&mut self) -> CatalogResult<()> {
        let Some(Overlay::ConfirmDelete { form, .. }) = self.overlay.take() else {
            return Ok(());
        };
        let FormMode::Edit(id) = form.mode() else {
            return Ok(());
        };
        let result = self.catalog.delete_product(id);
        self.surface(result.map_err(CatalogError::from))
    }

    /// Retry persisting after an earlier rejection
    ///
    /// # Errors
    /// Returns the store error if storage still rejects the write
    pub fn flush(&mut self) -> CatalogResult<()> {
        let result = self.catalog.flush();
        self.surface(result.map_err(CatalogError::from))
    }

    /// Notice still on screen at `now`
    #[must_use]
    pub fn notice_at(&self, now: Instant) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|(notice, shown_at)| !notice.is_expired(*shown_at, now))
            .map(|(notice, _)| notice)
    }

    /// Notice still on screen
    #[inline]
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice_at(Instant::now())
    }

    /// Take the current notice, dismissing it
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take().map(|(notice, _)| notice)
    }

    /// Raise a notice for an error result and pass the result through
    fn surface<T>(&mut self, result: CatalogResult<T>) -> CatalogResult<T> {
        if let Err(e) = &result {
            let notice = Notice::from(e).with_ttl(self.notice_ttl);
            tracing::debug!(message = notice.message(), "notice raised");
            self.notice = Some((notice, Instant::now()));
        }
        result
    }
}
