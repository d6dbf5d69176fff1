//! Subcommands driving a session
//!
//! Each command performs the same session transitions a user would in the
//! app. Output goes to `out`; notices are left on the session for the caller
//! to print.

use crate::render::TextRenderer;
use anyhow::{bail, Result};
use pertes_catalog::{render_view, BarcodeRenderer, ItemEvent, Mode, Overlay, Session, ViewItem};
use pertes_model::ProductId;
use pertes_store::StorageSlot;
use serde::Serialize;
use std::io::Write;

/// Parsed subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    List {
        edit: bool,
        search: Option<String>,
        json: bool,
        barcodes: bool,
    },
    Add {
        name: String,
        barcode: String,
    },
    Edit {
        id: ProductId,
        name: String,
        barcode: String,
    },
    Toggle {
        id: ProductId,
    },
    Delete {
        id: ProductId,
        yes: bool,
    },
    Show {
        id: ProductId,
    },
}

#[derive(Serialize)]
struct ItemRow<'a> {
    id: &'a str,
    name: &'a str,
    barcode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
}

impl<'a> From<&'a ViewItem> for ItemRow<'a> {
    fn from(item: &'a ViewItem) -> Self {
        Self {
            id: item.id.as_str(),
            name: &item.name,
            barcode: &item.barcode,
            visible: item.toggle.map(|t| t.on),
        }
    }
}

/// Run `command` against `session`
///
/// `confirm` is asked before a deletion unless the command already carries
/// the confirmation.
pub(crate) fn run<S, W>(
    session: &mut Session<S>,
    command: Command,
    out: &mut W,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<()>
where
    S: StorageSlot,
    W: Write,
{
    match command {
        Command::List {
            edit,
            search,
            json,
            barcodes,
        } => {
            session.set_mode(if edit { Mode::Edit } else { Mode::Browse });
            if let Some(query) = search {
                session.set_query(query);
            }
            list(session, out, json, barcodes)?;
        }
        Command::Add { name, barcode } => {
            session.set_mode(Mode::Edit);
            session.open_add();
            session.submit_form(&name, &barcode)?;
            if let Some(added) = session.catalog().products().last() {
                writeln!(out, "{}", added.id())?;
            }
        }
        Command::Edit { id, name, barcode } => {
            session.set_mode(Mode::Edit);
            if !session.open_edit(&id) {
                bail!("unknown product: {id}");
            }
            session.submit_form(&name, &barcode)?;
        }
        Command::Toggle { id } => {
            session.set_mode(Mode::Edit);
            session.handle(&id, ItemEvent::ToggleVisibility)?;
        }
        Command::Delete { id, yes } => {
            session.set_mode(Mode::Edit);
            if !session.open_edit(&id) || !session.request_delete() {
                tracing::debug!(%id, "nothing to delete");
                return Ok(());
            }
            let name = match session.overlay() {
                Some(Overlay::ConfirmDelete { product_name, .. }) => product_name.clone(),
                _ => String::new(),
            };
            if yes || confirm(&name) {
                session.confirm_delete()?;
            } else {
                session.cancel_delete();
                session.close_form();
            }
        }
        Command::Show { id } => {
            session.set_mode(Mode::Browse);
            if session.handle(&id, ItemEvent::Activate)?.is_none() {
                bail!("no visible product: {id}");
            }
            let Some(detail) = session.detail(&id) else {
                bail!("no visible product: {id}");
            };
            writeln!(out, "{}", detail.name)?;
            writeln!(out, "{}", TextRenderer.render(&detail.barcode, &detail.options))?;
            session.close_detail();
        }
    }
    Ok(())
}

fn list<S: StorageSlot, W: Write>(
    session: &Session<S>,
    out: &mut W,
    json: bool,
    barcodes: bool,
) -> Result<()> {
    let items = session.view();

    if json {
        let rows: Vec<ItemRow<'_>> = items.iter().map(ItemRow::from).collect();
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }

    let options = session.list_options();
    for rendered in render_view(items, &TextRenderer, &options) {
        let item = &rendered.item;
        match item.toggle {
            Some(toggle) => {
                let state = if toggle.on { "on" } else { "off" };
                writeln!(out, "{}\t{}\t{}\t[{state}]", item.id, item.name, item.barcode)?;
            }
            None => writeln!(out, "{}\t{}\t{}", item.id, item.name, item.barcode)?,
        }
        if barcodes {
            writeln!(out, "{}\n", rendered.visual)?;
        }
    }
    Ok(())
}
