//! Product form - the caller-side validation boundary
//!
//! Catalog operations never validate; the form does, before anything is
//! mutated. Checks run in order and stop at the first failure:
//!
//! 1. name empty after trimming
//! 2. barcode empty after trimming
//! 3. barcode already used by another product (adding only)

use crate::error::{Field, ValidationError};
use pertes_model::{Product, ProductId};

/// What the form is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Creating a new product
    Add,
    /// Editing an existing product
    Edit(ProductId),
}

/// Validated form contents, ready to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Add or edit of a given product
    pub mode: FormMode,
    /// Trimmed name
    pub name: String,
    /// Trimmed barcode
    pub barcode: String,
}

/// Add/edit form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    mode: FormMode,
    name: String,
    barcode: String,
    name_error: bool,
    barcode_error: bool,
}

impl ProductForm {
    /// Empty form for a new product
    #[must_use]
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            name: String::new(),
            barcode: String::new(),
            name_error: false,
            barcode_error: false,
        }
    }

    /// Form pre-filled with `product`
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit(product.id().clone()),
            name: product.name().to_string(),
            barcode: product.barcode().to_string(),
            name_error: false,
            barcode_error: false,
        }
    }

    /// Form mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Current name input
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current barcode input
    #[inline]
    #[must_use]
    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    /// Replace name input
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace barcode input
    pub fn set_barcode(&mut self, barcode: impl Into<String>) {
        self.barcode = barcode.into();
    }

    /// Whether `field` is flagged
    #[inline]
    #[must_use]
    pub fn has_error(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name_error,
            Field::Barcode => self.barcode_error,
        }
    }

    /// Focusing a field clears its flag
    pub fn focus(&mut self, field: Field) {
        self.set_error(field, false);
    }

    /// Clear both flags
    pub fn clear_errors(&mut self) {
        self.name_error = false;
        self.barcode_error = false;
    }

    fn set_error(&mut self, field: Field, flagged: bool) {
        match field {
            Field::Name => self.name_error = flagged,
            Field::Barcode => self.barcode_error = flagged,
        }
    }

    /// Validate the inputs against `products`
    ///
    /// Clears previous flags first; on failure the offending field is flagged.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] found
    pub fn validate(&mut self, products: &[Product]) -> Result<Submission, ValidationError> {
        self.clear_errors();
        match validate_inputs(&self.mode, &self.name, &self.barcode, products) {
            Ok((name, barcode)) => Ok(Submission {
                mode: self.mode.clone(),
                name,
                barcode,
            }),
            Err(e) => {
                self.set_error(e.field(), true);
                Err(e)
            }
        }
    }
}

/// Trim and check raw inputs, returning the trimmed `(name, barcode)`
///
/// # Errors
/// Returns the first [`ValidationError`] found
pub fn validate_inputs(
    mode: &FormMode,
    name: &str,
    barcode: &str,
    products: &[Product],
) -> Result<(String, String), ValidationError> {
    let name = name.trim();
    let barcode = barcode.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if barcode.is_empty() {
        return Err(ValidationError::EmptyBarcode);
    }
    if *mode == FormMode::Add && products.iter().any(|p| p.barcode() == barcode) {
        return Err(ValidationError::DuplicateBarcode(barcode.to_string()));
    }

    Ok((name.to_string(), barcode.to_string()))
}
