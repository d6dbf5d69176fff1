//! View projection
//!
//! Turns a product list and a [`Mode`] into the items the user sees, the
//! controls each item carries, and where an activation on an item goes.
//! Drawing the barcode symbol is delegated to a [`BarcodeRenderer`].
//!
//! | Mode   | Hidden products | Toggle control | Activate item   |
//! |--------|-----------------|----------------|-----------------|
//! | Browse | excluded        | none           | barcode detail  |
//! | Edit   | included        | on / off       | edit form       |

use crate::config::RenderConfig;
use crate::query::sort_by_name;
use pertes_model::{Product, ProductId};

/// UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Default mode: visible products only, items open the barcode detail
    #[default]
    Browse,
    /// Editing mode: every product, with add and visibility controls
    Edit,
}

impl Mode {
    /// The other mode
    #[inline]
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Browse => Self::Edit,
            Self::Edit => Self::Browse,
        }
    }

    /// Whether `product` appears in this mode
    #[inline]
    #[must_use]
    pub fn shows(self, product: &Product) -> bool {
        match self {
            Self::Browse => product.is_visible(),
            Self::Edit => true,
        }
    }

    /// Global controls for this mode
    #[must_use]
    pub fn chrome(self) -> ModeChrome {
        match self {
            Self::Browse => ModeChrome {
                toggle_label: "Modifier",
                locked: true,
                show_add: false,
            },
            Self::Edit => ModeChrome {
                toggle_label: "Terminer",
                locked: false,
                show_add: true,
            },
        }
    }
}

/// Mode-dependent global controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChrome {
    /// Label on the mode toggle button
    pub toggle_label: &'static str,
    /// Lock icon state (locked in browse mode)
    pub locked: bool,
    /// Whether the add affordance is shown
    pub show_add: bool,
}

/// Barcode symbology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Symbology {
    /// Code 128
    #[default]
    Code128,
}

impl Symbology {
    /// Symbology name as renderers expect it
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code128 => "CODE128",
        }
    }
}

/// Options handed to the barcode renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Barcode format
    pub symbology: Symbology,
    /// Bar width in pixels
    pub width: u32,
    /// Bar height in pixels
    pub height: u32,
    /// Print the barcode text under the bars
    pub show_text: bool,
}

impl RenderOptions {
    /// Options for list items
    #[inline]
    #[must_use]
    pub fn list(config: &RenderConfig) -> Self {
        Self {
            symbology: Symbology::Code128,
            width: config.width,
            height: config.height,
            show_text: true,
        }
    }

    /// Options for the large barcode detail
    #[inline]
    #[must_use]
    pub fn detail(config: &RenderConfig) -> Self {
        Self {
            height: config.detail_height,
            ..Self::list(config)
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::list(&RenderConfig::default())
    }
}

/// External barcode drawing routine
///
/// The catalog only supplies the text and options; it never inspects the
/// returned visual.
pub trait BarcodeRenderer {
    /// Rendered artifact
    type Visual;

    /// Draw `text` as a barcode symbol
    fn render(&self, text: &str, options: &RenderOptions) -> Self::Visual;
}

/// Visibility control shown on an item in edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityToggle {
    /// Whether the product is currently visible
    pub on: bool,
}

/// One projected product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem {
    /// Product id
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Barcode text
    pub barcode: String,
    /// Present in edit mode only
    pub toggle: Option<VisibilityToggle>,
}

impl ViewItem {
    fn project(product: &Product, mode: Mode) -> Self {
        Self {
            id: product.id().clone(),
            name: product.name().to_string(),
            barcode: product.barcode().to_string(),
            toggle: match mode {
                Mode::Browse => None,
                Mode::Edit => Some(VisibilityToggle {
                    on: product.is_visible(),
                }),
            },
        }
    }

    /// Render this item's barcode
    pub fn render<R: BarcodeRenderer>(&self, renderer: &R, options: &RenderOptions) -> R::Visual {
        renderer.render(&self.barcode, options)
    }
}

/// Project products for `mode`: drop what the mode hides, then sort by name
#[must_use]
pub fn project<'a>(products: impl IntoIterator<Item = &'a Product>, mode: Mode) -> Vec<ViewItem> {
    sort_by_name(products.into_iter().filter(|p| mode.shows(p)))
        .into_iter()
        .map(|p| ViewItem::project(p, mode))
        .collect()
}

/// User action on an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
    /// Click on the item itself
    Activate,
    /// Click on the item's visibility control
    ToggleVisibility,
}

/// Where an item event is routed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Open the large barcode detail
    ShowBarcode(ProductId),
    /// Open the edit form
    OpenEditor(ProductId),
    /// Flip visibility; the item's own activation is suppressed
    ToggleVisibility(ProductId),
}

/// Route an event on `item` in `mode`
///
/// Returns `None` when the item has no control for the event (a visibility
/// click in browse mode).
#[must_use]
pub fn route(mode: Mode, item: &ViewItem, event: ItemEvent) -> Option<Route> {
    let id = item.id.clone();
    match (mode, event) {
        (Mode::Browse, ItemEvent::Activate) => Some(Route::ShowBarcode(id)),
        (Mode::Edit, ItemEvent::Activate) => Some(Route::OpenEditor(id)),
        (Mode::Edit, ItemEvent::ToggleVisibility) if item.toggle.is_some() => {
            Some(Route::ToggleVisibility(id))
        }
        _ => None,
    }
}

/// A projected item with its drawn barcode
#[derive(Debug, Clone)]
pub struct RenderedItem<V> {
    /// The projected product
    pub item: ViewItem,
    /// Renderer output for its barcode
    pub visual: V,
}

/// Render every item's barcode
pub fn render_view<R: BarcodeRenderer>(
    items: Vec<ViewItem>,
    renderer: &R,
    options: &RenderOptions,
) -> Vec<RenderedItem<R::Visual>> {
    items
        .into_iter()
        .map(|item| {
            let visual = item.render(renderer, options);
            RenderedItem { item, visual }
        })
        .collect()
}
