//! Command handlers for the store catalog.
//!
//! Every command loads the catalog into an [`AppState`] backed by a
//! [`HeadlessMap`] and drives it through the same handlers a map UI would
//! call, so filtering here behaves exactly like it does on the map.

use std::collections::BTreeSet;

use foodmap_core::{AppConfig, PriceLevelSelector, Store, StoreId};
use foodmap_engine::{
    AppState, EngineError, HeadlessMap, LoadState, PopupContent, StoreRow, StoreSource,
};

use crate::Commands;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Loads the catalog from `source` and dispatches `command`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the command's filter
/// input is rejected (unknown tag, price rank out of range).
pub(crate) async fn run<S: StoreSource>(
    source: &S,
    config: &AppConfig,
    command: Commands,
) -> anyhow::Result<()> {
    let unset_price = match &command {
        Commands::Search {
            unset_price: Some(policy),
            ..
        } => *policy,
        _ => config.unset_price_policy,
    };
    let price = PriceLevelSelector::new(config.price_level_buttons)?;
    let mut state = AppState::initialize(source, HeadlessMap::new(), price, unset_price).await;

    if let LoadState::Failed(reason) = state.load_state() {
        anyhow::bail!("failed to load stores: {reason}");
    }

    match command {
        Commands::Tags => {
            run_tags(&state);
            Ok(())
        }
        Commands::Search {
            keyword,
            price,
            tags,
            json,
            ..
        } => run_search(&mut state, keyword, price, &tags, json),
        Commands::Show { id, json } => run_show(&mut state, source, StoreId::new(id), json).await,
    }
}

fn run_tags(state: &AppState<HeadlessMap>) {
    let stores = state.map().catalog().stores();
    for option in state.controls().tags().options() {
        let count = stores.iter().filter(|s| s.has_tag(&option.name)).count();
        println!("{:<8} {} ({count})", option.id, option.name);
    }
}

fn run_search(
    state: &mut AppState<HeadlessMap>,
    keyword: String,
    price: Option<u32>,
    tags: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let rows = search_rows(state, keyword, price, tags)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        println!("{row}");
    }
    println!("{} of {} stores", rows.len(), state.map().catalog().len());
    Ok(())
}

/// Rows for a search. With no filter input this is the initial store list,
/// every store with its marker left attached.
fn search_rows(
    state: &mut AppState<HeadlessMap>,
    keyword: String,
    price: Option<u32>,
    tags: &[String],
) -> anyhow::Result<Vec<StoreRow>> {
    let mut rows: Vec<StoreRow> = Vec::new();
    if keyword.is_empty() && price.is_none() && tags.is_empty() {
        state.map().list_all(&mut rows);
        return Ok(rows);
    }

    state.set_keyword(keyword, None)?;
    for tag in tags.iter().collect::<BTreeSet<_>>() {
        state.toggle_tag(tag, None)?;
    }
    match price {
        Some(rank) => state.select_price(rank, Some(&mut rows))?,
        None => state.search(Some(&mut rows))?,
    };
    Ok(rows)
}

async fn run_show<S: StoreSource>(
    state: &mut AppState<HeadlessMap>,
    source: &S,
    id: StoreId,
    json: bool,
) -> anyhow::Result<()> {
    // A failed detail fetch still leaves the summary record to print.
    match state.open_store(source, &id).await {
        Ok(_) | Err(EngineError::Source(_)) => {}
        Err(err) => return Err(err.into()),
    }

    let store = state
        .store(&id)
        .ok_or_else(|| anyhow::anyhow!("store {id} is not in the catalog"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(store)?);
    } else {
        print_store(store);
    }
    Ok(())
}

fn print_store(store: &Store) {
    println!("{}", PopupContent::for_store(store));
    if let Some(score) = store.score {
        println!("score: {score:.1}");
    }

    let Some(details) = &store.details else {
        println!("(details unavailable)");
        return;
    };

    if let Some(description) = &details.description {
        println!("{description}");
    }
    if let Some(open) = details.is_open {
        println!("open now: {}", if open { "yes" } else { "no" });
    }
    if let Some(stars) = details.average_stars {
        println!("stars: {stars:.1} ({} reviews)", details.comments.len());
    }
    for (i, day) in WEEKDAYS.iter().enumerate() {
        let spans = details.business_hours.day(i);
        if spans.is_empty() {
            continue;
        }
        let spans: Vec<String> = spans
            .iter()
            .map(|[open, close]| format!("{open}-{close}"))
            .collect();
        println!("{day}: {}", spans.join(", "));
    }
    if !details.menu.is_empty() {
        println!("menu:");
        for product in &details.menu {
            match product.price {
                Some(price) => println!("  {} ({price})", product.name),
                None => println!("  {}", product.name),
            }
        }
    }
}
