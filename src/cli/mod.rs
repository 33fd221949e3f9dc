// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions and command handlers for petal.
//!
//! Three subcommands over a registry JSON file: `search` runs a ranked query
//! through the same scheduler the browser uses, `browse` pages through the
//! catalog (optionally by first letter), and `inspect` summarizes what the
//! normalizer made of the dataset.

pub mod display;

use std::collections::BTreeMap;
use std::fs;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

use petal::results::ResultPaginator;
use petal::types::UNDATED;
use petal::{
    load_records, naive_search, prefix_filter, Database, PageView, Record, ScoredRecord,
    SearchConfig, SearchKind, SearchScheduler, SortField, SystemClock,
};

use display::*;

#[derive(Parser)]
#[command(
    name = "petal",
    about = "Ranked fuzzy search over a peony cultivar registry",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a registry file and show one page of ranked results
    Search {
        /// Path to the registry JSON (an array of records)
        data: String,

        /// Search query
        query: String,

        /// Fields to search: All, Cultivar, Originator, Group, Country or Date
        #[arg(short, long, default_value = "All")]
        kind: String,

        /// 1-based page to show
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Sort by score, cultivar, originator, group, country or date
        #[arg(short, long)]
        sort: Option<String>,

        /// Flip the sort direction
        #[arg(short, long)]
        reverse: bool,

        /// JSON file with scheduler/paginator settings (camelCase, ms)
        #[arg(long)]
        config: Option<String>,

        /// Plain substring matching instead of ranked scoring
        #[arg(long)]
        naive: bool,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Page through the catalog, optionally only titles starting with a letter
    Browse {
        /// Path to the registry JSON (an array of records)
        data: String,

        /// First letter of the cultivar name
        #[arg(short, long)]
        letter: Option<String>,

        /// 1-based page to show
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Sort by cultivar, originator, group, country or date
        #[arg(short, long)]
        sort: Option<String>,

        /// Flip the sort direction
        #[arg(short, long)]
        reverse: bool,

        /// Results per page
        #[arg(long, default_value = "25")]
        page_size: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a registry file
    Inspect {
        /// Path to the registry JSON (an array of records)
        data: String,
    },
}

pub fn run(cli: Cli) -> petal::Result<()> {
    match cli.command {
        Commands::Search {
            data,
            query,
            kind,
            page,
            sort,
            reverse,
            config,
            naive,
            json,
        } => {
            let config = match config {
                Some(path) => SearchConfig::from_json(&fs::read_to_string(path)?)?,
                None => SearchConfig::default(),
            };
            let kind: SearchKind = kind.parse()?;
            let records = load_records(&data)?;
            let mut paginator = if naive {
                naive_results(records, &query, kind, config.page_size)
            } else {
                ranked_results(records, &query, kind, config)
            };
            let view = arrange(&mut paginator, sort.as_deref(), reverse, page)?;
            if json {
                print_json(&view)
            } else {
                print_page(&format!("{} {}", kind_badge(kind), query), &view);
                Ok(())
            }
        }

        Commands::Browse {
            data,
            letter,
            page,
            sort,
            reverse,
            page_size,
            json,
        } => {
            let db = augment(load_records(&data)?);
            let mut paginator = ResultPaginator::new(page_size, true, None);
            paginator.init_db(&db);
            if let Some(letter) = &letter {
                let filtered: Vec<ScoredRecord> = prefix_filter(&db, letter)
                    .into_iter()
                    .map(ScoredRecord::unscored)
                    .collect();
                paginator.reset_results(Some(filtered), false);
            }
            let view = arrange(&mut paginator, sort.as_deref(), reverse, page)?;
            if json {
                print_json(&view)
            } else {
                let heading = match &letter {
                    Some(letter) => format!("Cultivars starting with {}", letter.to_uppercase()),
                    None => "Catalog".to_string(),
                };
                print_page(&heading, &view);
                Ok(())
            }
        }

        Commands::Inspect { data } => {
            let db = augment(load_records(&data)?);
            print_summary(&data, &db);
            Ok(())
        }
    }
}

// =============================================================================
// RUNNING SEARCHES
// =============================================================================

fn augment(records: Vec<Record>) -> Database {
    #[cfg(feature = "parallel")]
    {
        petal::augment_all_parallel(records)
    }
    #[cfg(not(feature = "parallel"))]
    {
        petal::augment_all(records)
    }
}

/// Drive the scheduler on the wall clock, the way the browser does.
fn ranked_results(
    records: Vec<Record>,
    query: &str,
    kind: SearchKind,
    config: SearchConfig,
) -> ResultPaginator {
    let start = Instant::now();
    let mut paginator = ResultPaginator::new(config.page_size, true, None);
    let mut scheduler = SearchScheduler::new(SystemClock::new(), config);

    scheduler.init_db(records, &mut paginator);
    scheduler.run_until_idle(&mut paginator);
    info!(elapsed = ?start.elapsed(), "database prepared");

    let start = Instant::now();
    scheduler.search(query, kind);
    scheduler.run_until_idle(&mut paginator);
    info!(elapsed = ?start.elapsed(), results = paginator.len(), "search finished");
    paginator
}

fn naive_results(
    records: Vec<Record>,
    query: &str,
    kind: SearchKind,
    page_size: usize,
) -> ResultPaginator {
    let db = augment(records);
    let mut paginator = ResultPaginator::new(page_size, true, None);
    paginator.init_db(&db);
    if !query.trim().is_empty() {
        paginator.search_results(naive_search(&db, query, kind));
    }
    paginator
}

/// Apply the requested sorter, direction and page.
fn arrange(
    paginator: &mut ResultPaginator,
    sort: Option<&str>,
    reverse: bool,
    page: usize,
) -> petal::Result<PageView> {
    if let Some(sort) = sort {
        paginator.set_sorter(sort)?;
    }
    if reverse {
        // Re-picking the current sorter flips it.
        let current = paginator.sorter().name().to_string();
        paginator.set_sorter(&current)?;
    }
    if !paginator.goto(page.saturating_sub(1)) {
        eprintln!(
            "{}",
            themed(YELLOW, &[], &format!("page {} out of range, showing page 1", page))
        );
    }
    Ok(paginator.page())
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_json(view: &PageView) -> petal::Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

fn print_page(heading: &str, view: &PageView) {
    let scored = view.sorter == SortField::Score;

    section_top(&truncate(heading, BOX_WIDTH - 6));
    row(&format!(
        " {}  sorted by {} {}",
        view.range,
        view.sorter.name(),
        direction_arrow(view.direction)
    ));
    section_mid("Results");

    if view.view.is_empty() {
        row(&themed(GRAY, &[DIM], " no matches"));
    }
    for result in &view.view {
        let record = &result.record.record;
        let name = themed(GREEN, &[BOLD], &truncate(&record.cultivar, 34));
        let originator = truncate(&record.originator, 22);
        let date = truncate(&record.date, 8);
        let line = if scored {
            format!(
                " {} {} {} {}",
                score_value(result.score),
                pad_right(&name, 34),
                pad_right(&originator, 22),
                date
            )
        } else {
            format!(
                " {} {} {} {}",
                pad_right(&name, 34),
                pad_right(&originator, 22),
                pad_right(&truncate(&record.group, 9), 9),
                date
            )
        };
        row(&line);
    }

    section_mid(&format!("Page {} of {}", view.page_no + 1, view.page_count.max(1)));
    row(&format!(" {}", breadcrumb_line(&view.pages)));
    section_bot();
}

fn print_summary(path: &str, db: &Database) {
    let native = db.iter().filter(|r| !r.native_cultivar_norm.is_empty()).count();
    let dated: Vec<f64> = db
        .iter()
        .map(|r| r.date_value)
        .filter(|&year| year < UNDATED)
        .collect();
    let earliest = dated.iter().copied().fold(f64::INFINITY, f64::min);
    let latest = dated.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
    let mut countries: BTreeMap<&str, usize> = BTreeMap::new();
    for r in db.iter() {
        *groups.entry(r.record.group.as_str()).or_default() += 1;
        *countries.entry(r.record.country.as_str()).or_default() += 1;
    }

    section_top(&truncate(path, BOX_WIDTH - 6));
    row(&format!(" Records:         {}", themed(CYAN, &[BOLD], &db.len().to_string())));
    row(&format!(" Bilingual names: {}", native));
    row(&format!(" Undated:         {}", db.len() - dated.len()));
    if !dated.is_empty() {
        row(&format!(" Introduced:      {:.0} - {:.0}", earliest, latest));
    }

    section_mid("Groups");
    for (group, count) in &groups {
        let label = if group.is_empty() { "(none)" } else { group };
        row(&format!(" {} {}", pad_right(&truncate(label, 40), 40), count));
    }

    section_mid("Countries");
    let mut by_count: Vec<(&str, usize)> = countries.into_iter().collect();
    by_count.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (country, count) in by_count.into_iter().take(10) {
        let label = if country.is_empty() { "(none)" } else { country };
        row(&format!(" {} {}", pad_right(&truncate(label, 40), 40), count));
    }

    section_mid("Prefixes");
    let letters: String = petal::search::prefixes()
        .map(|letter| {
            let count = prefix_filter(db, &letter.to_string()).len();
            if count == 0 {
                themed(GRAY, &[DIM], &letter.to_string())
            } else {
                letter.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    row(&format!(" {}", letters));
    section_bot();
}
