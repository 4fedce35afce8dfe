//! One-shot subcommands, each driving the matching form state machine for a
//! single pass. Errors are recovered here: the banner is printed and the
//! command reports failure, nothing propagates.

use item_core::{ApiError, CreateForm, DataItem, DeleteForm, QueryPanel, UpdateForm};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::Api;

pub fn print_item(item: &DataItem) {
    println!("id:          {}", item.id.map_or("-".to_string(), |id| id.to_string()));
    println!("name:        {}", item.name);
    println!("description: {}", item.description);
    println!("value:       {}", item.value);
    println!("created at:  {}", item.created_at.as_deref().unwrap_or("unknown"));
    println!("updated at:  {}", item.updated_at.as_deref().unwrap_or("unknown"));
}

pub fn print_items(items: &[DataItem]) {
    if items.is_empty() {
        println!("no items");
        return;
    }
    println!("{} item(s):", items.len());
    for item in items {
        println!(
            "  [{}] {} = {} ({})",
            item.id.map_or("-".to_string(), |id| id.to_string()),
            item.name,
            item.value,
            item.description,
        );
    }
}

pub async fn create(api: &Api, name: &str, description: &str, value: f64) -> bool {
    let mut form = CreateForm::new();
    form.set_name(name);
    form.set_description(description);
    form.set_value(&value.to_string());

    let payload = match form.submit() {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("error: {e}");
            return false;
        }
    };
    form.apply_submit(api.create(&payload).await);

    if let Some(err) = form.error() {
        eprintln!("error: {err}");
        return false;
    }
    if let Some(item) = form.last_created() {
        println!("created:");
        print_item(item);
    }
    true
}

pub async fn list(api: &Api) -> bool {
    let mut panel = QueryPanel::new();
    panel.begin_refresh();
    panel.apply_list(api.list().await);

    if let Some(err) = panel.error() {
        eprintln!("error: {err}");
        return false;
    }
    print_items(panel.items());
    true
}

pub async fn get(api: &Api, id: i64) -> bool {
    match api.get(id).await {
        Ok(item) => {
            print_item(&item);
            true
        }
        Err(ApiError::NotFound) => {
            eprintln!("error: no item with id {id} exists");
            false
        }
        Err(err) => {
            eprintln!("error: {err}");
            false
        }
    }
}

pub async fn update(
    api: &Api,
    id: i64,
    name: Option<&str>,
    description: Option<&str>,
    value: Option<f64>,
) -> bool {
    let mut form = UpdateForm::new();
    form.set_id_input(&id.to_string());

    // Phase 1: fetch the original.
    let id = match form.begin_lookup() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("error: {e}");
            return false;
        }
    };
    form.apply_lookup(id, api.get(id).await);
    if let Some(err) = form.error() {
        eprintln!("error: {err}");
        return false;
    }

    // Phase 2: apply the edits to the draft and submit if anything differs.
    if let Some(name) = name {
        form.set_name(name);
    }
    if let Some(description) = description {
        form.set_description(description);
    }
    if let Some(value) = value {
        form.set_value(&value.to_string());
    }

    let Some((id, patch)) = form.submit() else {
        eprintln!("error: no fields differ from the fetched data, nothing to update");
        return false;
    };
    form.apply_submit(api.update(id, &patch).await);

    if let Some(err) = form.error() {
        eprintln!("error: {err}");
        return false;
    }
    println!("updated:");
    if let Some(item) = form.original() {
        print_item(item);
    }
    true
}

pub async fn delete(api: &Api, id: i64, yes: bool) -> bool {
    let mut form = DeleteForm::new();
    form.set_id_input(&id.to_string());

    // Phase 1: look the item up for the confirmation display.
    let id = match form.begin_lookup() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("error: {e}");
            return false;
        }
    };
    form.apply_lookup(id, api.get(id).await);
    if let Some(err) = form.error() {
        eprintln!("error: {err}");
        return false;
    }
    if let Some(item) = form.pending_item() {
        println!("about to delete:");
        print_item(item);
    }

    // Phase 2: explicit confirmation, then the delete itself.
    if !yes && !confirm_on_stdin().await {
        form.cancel();
        println!("cancelled");
        return true;
    }
    let Some(id) = form.confirm() else {
        return false;
    };
    form.apply_delete(api.delete(id).await);

    if let Some(err) = form.error() {
        eprintln!("error: {err}");
        return false;
    }
    println!("deleted item {id}");
    true
}

async fn confirm_on_stdin() -> bool {
    print!("delete this item? [y/N] ");
    use std::io::Write;
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    if reader.read_line(&mut line).await.is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}
