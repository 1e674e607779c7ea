//! # Quote Commands
//!
//! Argument parsing and the two quotes the tool can give.
//!
//! ```text
//! powderbook-quote unit  --price P [--shipping S] [--tax T] --qty Q [--unit ea|lb]
//! powderbook-quote round --charge GR [--powder $/lb] [--primer $] [--projectile $]
//!                        [--case $ --reloads N] [--rounds N] [--name N --caliber C]
//! powderbook-quote spent --file purchases.json
//! ```
//!
//! `unit` keeps the calculator's permissive input handling: a malformed
//! amount prints `$NaN`, a zero quantity prints `$0.000` marked unknown.
//! `round` and `spent` are stricter and reject values they cannot parse.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use powderbook_core::cost::{calculate_per_unit_raw, coerce_number, total_spent};
use powderbook_core::recipe::{cost_per_round, ComponentPrices, Recipe, RoundCost};
use powderbook_core::validation::{validate_purchase, validate_recipe};
use powderbook_core::{CurrencyFormat, Money, PerUnitCost, PurchaseLineItem, Unit};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{QuoteError, QuoteResult};

/// Usage text for `--help`.
pub const USAGE: &str = "\
Powderbook cost quotes

Usage:
  powderbook-quote unit  --price P [--shipping S] [--tax T] --qty Q [--unit ea|lb] [--json]
  powderbook-quote round --charge GR [--powder P] [--primer P] [--projectile P]
                         [--case P --reloads N] [--rounds N]
                         [--name NAME] [--caliber CALIBER] [--json]
  powderbook-quote spent --file PURCHASES.json [--json]

Environment:
  POWDERBOOK_CURRENCY_SYMBOL    Currency prefix (default: $)
  POWDERBOOK_CURRENCY_DECIMALS  Decimal places (default: 3)
  POWDERBOOK_ROUNDING           half_up | half_even | truncate (default: half_up)
  POWDERBOOK_OUTPUT             text | json (default: text)
  RUST_LOG                      Log filter (default: info)";

// =============================================================================
// Parsed Commands
// =============================================================================

/// Inputs for a per-unit quote, kept as typed so coercion matches the app.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitArgs {
    pub price: String,
    pub shipping: Option<String>,
    pub tax: Option<String>,
    pub qty: String,
    pub unit: Unit,
}

/// Inputs for a cost-per-round quote.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundArgs {
    pub recipe: Recipe,
    pub prices: ComponentPrices,
    pub rounds: Option<u32>,
}

/// Inputs for a spending summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SpentArgs {
    /// JSON array of purchase records, as exported by the frontend.
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Unit(UnitArgs),
    Round(RoundArgs),
    Spent(SpentArgs),
    Help,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: Command,
    /// `--json` was given.
    pub json: bool,
}

/// Parses arguments (without the program name).
pub fn parse_args(args: &[String]) -> QuoteResult<Invocation> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Invocation {
            command: Command::Help,
            json: false,
        });
    };

    if matches!(name.as_str(), "--help" | "-h" | "help") {
        return Ok(Invocation {
            command: Command::Help,
            json: false,
        });
    }

    let (flags, json, help) = collect_flags(rest)?;
    if help {
        return Ok(Invocation {
            command: Command::Help,
            json,
        });
    }

    let command = match name.as_str() {
        "unit" => Command::Unit(unit_args(&flags)?),
        "round" => Command::Round(round_args(&flags)?),
        "spent" => Command::Spent(SpentArgs {
            file: PathBuf::from(required(&flags, "--file")?),
        }),
        other => return Err(QuoteError::UnknownCommand(other.to_string())),
    };

    Ok(Invocation { command, json })
}

type Flags = HashMap<String, String>;

fn collect_flags(args: &[String]) -> QuoteResult<(Flags, bool, bool)> {
    let mut flags = HashMap::new();
    let mut json = false;
    let mut help = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => json = true,
            "--help" | "-h" => help = true,
            flag if flag.starts_with("--") => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| QuoteError::MissingValue(flag.to_string()))?;
                if flags.insert(flag.to_string(), value.clone()).is_some() {
                    warn!(flag, "option given more than once, using the last value");
                }
                i += 1;
            }
            other => {
                return Err(QuoteError::InvalidValue {
                    flag: "argument".to_string(),
                    value: other.to_string(),
                })
            }
        }
        i += 1;
    }

    Ok((flags, json, help))
}

fn required(flags: &Flags, flag: &str) -> QuoteResult<String> {
    flags
        .get(flag)
        .cloned()
        .ok_or_else(|| QuoteError::MissingOption(flag.to_string()))
}

fn strict_number(flags: &Flags, flag: &str) -> QuoteResult<Option<f64>> {
    flags
        .get(flag)
        .map(|raw| {
            let value = coerce_number(raw);
            if value.is_finite() {
                Ok(value)
            } else {
                Err(QuoteError::InvalidValue {
                    flag: flag.to_string(),
                    value: raw.clone(),
                })
            }
        })
        .transpose()
}

fn strict_count(flags: &Flags, flag: &str) -> QuoteResult<Option<u32>> {
    flags
        .get(flag)
        .map(|raw| {
            raw.trim().parse::<u32>().map_err(|_| QuoteError::InvalidValue {
                flag: flag.to_string(),
                value: raw.clone(),
            })
        })
        .transpose()
}

fn unit_args(flags: &Flags) -> QuoteResult<UnitArgs> {
    let unit = match flags.get("--unit") {
        Some(raw) => raw.parse::<Unit>()?,
        None => Unit::Each,
    };

    Ok(UnitArgs {
        price: required(flags, "--price")?,
        shipping: flags.get("--shipping").cloned(),
        tax: flags.get("--tax").cloned(),
        qty: required(flags, "--qty")?,
        unit,
    })
}

fn round_args(flags: &Flags) -> QuoteResult<RoundArgs> {
    let charge_grains = strict_number(flags, "--charge")?
        .ok_or_else(|| QuoteError::MissingOption("--charge".to_string()))?;

    let prices = ComponentPrices {
        powder_per_lb: strict_number(flags, "--powder")?,
        primer_each: strict_number(flags, "--primer")?,
        projectile_each: strict_number(flags, "--projectile")?,
        case_each: strict_number(flags, "--case")?,
    };

    let case_reloads = match (prices.case_each, strict_count(flags, "--reloads")?) {
        (Some(_), Some(n)) => n,
        // A case price alone means single-use brass
        (Some(_), None) => 1,
        (None, _) => 0,
    };

    let name = flags.get("--name").map_or("quote", String::as_str);
    let caliber = flags.get("--caliber").map_or("unspecified", String::as_str);
    let recipe = Recipe::new(name, caliber, charge_grains).with_case_reloads(case_reloads);
    validate_recipe(&recipe)?;

    Ok(RoundArgs {
        recipe,
        prices,
        rounds: strict_count(flags, "--rounds")?,
    })
}

// =============================================================================
// Quotes
// =============================================================================

/// Result of a `unit` command.
#[derive(Debug, Clone, Serialize)]
pub struct UnitQuote {
    /// Sentinel figure: 0 for unknown quantity, NaN (JSON null) for bad input.
    pub per_unit: f64,
    pub display: String,
    pub unit: Unit,
    pub status: PerUnitCost,
    /// Price + shipping + tax in cents, when every amount parses as money.
    pub landed: Option<Money>,
}

impl UnitQuote {
    pub fn render(&self) -> String {
        let mut line = format!("Per {}: {}", self.unit, self.display);
        if self.status == PerUnitCost::UnknownQuantity {
            line.push_str(" (cost unknown: quantity is not positive)");
        }
        if let Some(landed) = self.landed {
            line.push_str(&format!("\nLanded: {}", landed));
        }
        line
    }
}

/// Sums the entered amounts as whole cents; `None` if any fails to parse.
fn landed_money(args: &UnitArgs) -> Option<Money> {
    let fee = |raw: &Option<String>| match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Money::zero()),
        Some(value) => Money::parse(value),
    };

    let landed = [Money::parse(&args.price), fee(&args.shipping), fee(&args.tax)]
        .into_iter()
        .sum::<Result<Money, _>>();

    match landed {
        Ok(money) => Some(money),
        Err(err) => {
            debug!(%err, "amounts do not parse as money, skipping landed total");
            None
        }
    }
}

/// Computes a per-unit quote.
pub fn quote_unit(args: &UnitArgs, currency: &CurrencyFormat) -> UnitQuote {
    let per_unit = calculate_per_unit_raw(
        &args.price,
        args.shipping.as_deref(),
        args.tax.as_deref(),
        &args.qty,
    );

    let optional = |raw: &Option<String>| match raw.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(coerce_number(value)),
    };
    let status = PerUnitCost::evaluate(
        coerce_number(&args.price),
        optional(&args.shipping),
        optional(&args.tax),
        coerce_number(&args.qty),
    );

    debug!(per_unit, ?status, "computed per-unit cost");

    UnitQuote {
        per_unit,
        display: currency.format(per_unit),
        unit: args.unit,
        status,
        landed: landed_money(args),
    }
}

/// Result of a `round` command.
#[derive(Debug, Clone, Serialize)]
pub struct RoundQuote {
    pub cost: RoundCost,
    pub display: RoundDisplay,
    pub rounds: Option<u32>,
}

/// Formatted breakdown lines.
#[derive(Debug, Clone, Serialize)]
pub struct RoundDisplay {
    pub powder: String,
    pub primer: String,
    pub projectile: String,
    pub case: String,
    pub total: String,
    pub batch: Option<String>,
}

impl RoundQuote {
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("Powder:     {}", self.display.powder),
            format!("Primer:     {}", self.display.primer),
            format!("Projectile: {}", self.display.projectile),
            format!("Case:       {}", self.display.case),
            format!("Per round:  {}", self.display.total),
        ];
        if let (Some(rounds), Some(batch)) = (self.rounds, &self.display.batch) {
            lines.push(format!("{} rounds: {}", rounds, batch));
        }
        if !self.cost.missing.is_empty() {
            let names: Vec<String> = self
                .cost
                .missing
                .iter()
                .map(|kind| format!("{:?}", kind).to_lowercase())
                .collect();
            lines.push(format!("Not priced: {}", names.join(", ")));
        }
        lines.join("\n")
    }
}

/// Computes a cost-per-round quote.
pub fn quote_round(args: &RoundArgs, currency: &CurrencyFormat) -> RoundQuote {
    let cost = cost_per_round(&args.recipe, &args.prices);

    if !cost.is_complete() {
        warn!(missing = ?cost.missing, "some components have no price");
    }

    let display = RoundDisplay {
        powder: currency.format(cost.powder),
        primer: currency.format(cost.primer),
        projectile: currency.format(cost.projectile),
        case: currency.format(cost.case),
        total: currency.format(cost.total),
        batch: args.rounds.map(|n| currency.format(cost.for_rounds(n))),
    };

    RoundQuote {
        cost,
        display,
        rounds: args.rounds,
    }
}

/// One purchase in a spending summary.
#[derive(Debug, Clone, Serialize)]
pub struct SpentLine {
    pub description: String,
    pub landed: Money,
    pub per_unit: String,
    pub unit: Unit,
}

/// Result of a `spent` command.
#[derive(Debug, Clone, Serialize)]
pub struct SpentQuote {
    pub items: Vec<SpentLine>,
    pub total: Money,
    pub display: String,
}

impl SpentQuote {
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .items
            .iter()
            .map(|item| {
                format!(
                    "{}: {} ({} per {})",
                    item.description, item.landed, item.per_unit, item.unit
                )
            })
            .collect();
        lines.push(format!("Total spent: {}", self.display));
        lines.join("\n")
    }
}

/// Reads purchase records from a JSON file.
pub fn load_purchases(file: &Path) -> QuoteResult<Vec<PurchaseLineItem>> {
    let path = file.display().to_string();
    let contents = fs::read_to_string(file).map_err(|source| QuoteError::Read {
        path: path.clone(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| QuoteError::Parse { path, source })
}

/// Validates every record and sums what was spent.
pub fn quote_spent(
    purchases: &[PurchaseLineItem],
    currency: &CurrencyFormat,
) -> QuoteResult<SpentQuote> {
    for (index, purchase) in purchases.iter().enumerate() {
        if let Err(err) = validate_purchase(purchase) {
            warn!(index, id = %purchase.id, "rejected purchase record");
            return Err(err.into());
        }
    }

    let items = purchases
        .iter()
        .map(|purchase| SpentLine {
            description: purchase.description.clone(),
            landed: purchase.landed_cost(),
            per_unit: currency.format(purchase.per_unit_amount()),
            unit: purchase.unit,
        })
        .collect();

    let total = total_spent(purchases);
    debug!(count = purchases.len(), total = total.cents(), "summed purchases");

    Ok(SpentQuote {
        items,
        total,
        display: currency.format(total.to_major()),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
