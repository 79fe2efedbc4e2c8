//! # Fractal Doors CLI
//!
//! Interactive terminal wizard for door quotes: profile setup, a
//! three-step quote wizard (opening, cutting list, hardware), job
//! listing and logout. Mirrors the original web form flow on the
//! terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use quote_core::cutting::{
    CuttingListEntry, DoorStyle, PanelMaterial, COMPONENT_WIDTH_RANGE_MM, LENGTH_RANGE_MM,
    QUANTITY_RANGE,
};
use quote_core::errors::{QuoteError, QuoteResult};
use quote_core::hardware::{HardwareItem, HardwareMode, HardwareSelection};
use quote_core::lookup::public_ip;
use quote_core::log::UsageLogEntry;
use quote_core::opening::{
    DoorThickness, OpeningSpec, EFFICIENCY_RANGE, HEIGHT_RANGE_MM, WIDTH_RANGE_MM,
};
use quote_core::pdf::render_quote_pdf;
use quote_core::profile::{BusinessProfile, CompanyType};
use quote_core::quote::{assemble, Job};
use quote_core::store::DataDir;
use quote_core::supplies::compute_supplies;

/// Door manufacturing quote generator.
#[derive(Parser, Debug)]
#[command(name = "fractal-doors")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding profile, jobs and log files
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the business profile (first-run setup)
    Setup,
    /// Run the quote wizard and generate a PDF
    Quote {
        /// Prefill the wizard from a saved job id
        #[arg(long)]
        from: Option<String>,
        /// Output PDF path (default: quote_<job id>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List saved jobs, or show one in full
    Jobs {
        /// Job id to show
        id: Option<String>,
    },
    /// Delete the business profile
    Logout,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let dir = DataDir::new(&args.data_dir);

    let result = match args.command {
        Command::Setup => run_setup(&dir),
        Command::Quote { from, output } => run_quote(&dir, from.as_deref(), output),
        Command::Jobs { id } => run_jobs(&dir, id.as_deref()),
        Command::Logout => run_logout(&dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_setup(dir: &DataDir) -> QuoteResult<()> {
    if let Some(existing) = dir.load_profile()? {
        println!("A profile for '{}' already exists.", existing.name);
        if !prompt_yes_no("Replace it?", false) {
            return Ok(());
        }
    }

    println!("Business Profile Setup");
    println!("======================");

    let name = prompt_string("Business Name: ", "");
    let type_names: Vec<&str> = CompanyType::ALL.iter().map(|t| t.display_name()).collect();
    let company_type = CompanyType::ALL[prompt_select("Company Type", &type_names, 0)];
    let address = prompt_string("Address: ", "");
    let phone = prompt_string("Phone: ", "");
    let email = prompt_string("Email: ", "");
    let website = prompt_string("Website (optional): ", "");
    let social = prompt_string("Social Media (optional): ", "");

    let profile = BusinessProfile {
        name,
        company_type,
        address,
        phone,
        email,
        website: non_empty(website),
        social: non_empty(social),
    };

    // Required-field check happens inside save_profile, before any write.
    dir.save_profile(&profile)?;
    println!("Profile created successfully.");
    Ok(())
}

fn run_quote(dir: &DataDir, from: Option<&str>, output: Option<PathBuf>) -> QuoteResult<()> {
    let profile = dir
        .load_profile()?
        .ok_or(QuoteError::ProfileNotConfigured)?;

    println!("Fractal Doors - Quote Wizard");
    println!("============================");
    println!("Logged in as: {}", profile.name);
    println!();

    // Optional prefill from a saved job.
    let loaded = match from {
        Some(id) => {
            let job = dir.load_job(id)?;
            info!("loaded job {}", id);
            Some(job)
        }
        None => None,
    };

    let opening = prompt_opening(loaded.as_ref().map(|j| &j.quote.opening))?;
    println!(
        "Used: {} x {} mm @ {}",
        opening.used_width_mm(),
        opening.used_height_mm(),
        opening.thickness
    );
    println!();

    let (preset, cutting_list) = prompt_cutting_list(loaded.as_ref())?;
    println!();

    let hardware = prompt_hardware(loaded.as_ref().map(|j| &j.quote.hardware))?;
    println!();

    // Generate: compute, assemble, persist, log, render.
    let supplies = compute_supplies(
        opening.used_height_mm(),
        opening.used_width_mm(),
        opening.efficiency,
        opening.thickness,
    );
    let quote = assemble(profile, opening, preset, cutting_list, hardware, supplies);

    println!("Quote Summary");
    println!("-------------");
    for item in &quote.line_items {
        if item.quantity.fract() == 0.0 {
            println!("  {:<18} {:.0}", item.name, item.quantity);
        } else {
            println!("  {:<18} {:.2}", item.name, item.quantity);
        }
    }
    println!();

    let job = Job::new(quote);
    let id = dir.save_job(&job)?;

    // The IP lookup may fail; the quote is already saved by then and
    // the log entry just records "unknown".
    let ip = public_ip();
    debug!(ip = %ip, "resolved caller ip");
    let entry = UsageLogEntry::for_quote(&job.quote, job.created, ip);
    dir.append_log(&entry)?;

    let pdf_bytes = render_quote_pdf(&job.quote)?;
    let path = output.unwrap_or_else(|| default_pdf_path(&id));
    std::fs::write(&path, &pdf_bytes).map_err(|e| {
        QuoteError::file_error("write", path.display().to_string(), e.to_string())
    })?;

    println!("Saved job {} and logged usage.", id);
    println!("Quote PDF written to {}", path.display());
    Ok(())
}

fn run_jobs(dir: &DataDir, id: Option<&str>) -> QuoteResult<()> {
    match id {
        Some(id) => {
            let job = dir.load_job(id)?;
            let json = serde_json::to_string_pretty(&job).map_err(|e| {
                QuoteError::SerializationError {
                    reason: e.to_string(),
                }
            })?;
            println!("{}", json);
        }
        None => {
            let jobs = dir.load_jobs()?;
            if jobs.is_empty() {
                println!("No saved jobs.");
                return Ok(());
            }
            // Newest first, matching the original job picker.
            for (id, job) in jobs.iter().rev() {
                println!(
                    "{}  {:<12}  {} x {} mm @ {}",
                    id,
                    job.quote.preset.display_name(),
                    job.quote.used_width_mm,
                    job.quote.used_height_mm,
                    job.quote.opening.thickness,
                );
            }
        }
    }
    Ok(())
}

fn run_logout(dir: &DataDir) -> QuoteResult<()> {
    dir.delete_profile()?;
    println!("Profile deleted.");
    Ok(())
}

// ============================================================================
// Wizard steps
// ============================================================================

fn prompt_opening(prefill: Option<&OpeningSpec>) -> QuoteResult<OpeningSpec> {
    let base = prefill.cloned().unwrap_or_default();
    let (h_min, h_max) = HEIGHT_RANGE_MM;
    let (w_min, w_max) = WIDTH_RANGE_MM;

    println!("Step 1 - Opening & Thickness");
    let left_mm = prompt_u32_in("Height Left (mm)", h_min, h_max, base.left_mm);
    let centre_mm = prompt_u32_in("Height Centre (mm)", h_min, h_max, base.centre_mm);
    let right_mm = prompt_u32_in("Height Right (mm)", h_min, h_max, base.right_mm);
    let bottom_mm = prompt_u32_in("Width Bottom (mm)", w_min, w_max, base.bottom_mm);
    let middle_mm = prompt_u32_in("Width Middle (mm)", w_min, w_max, base.middle_mm);
    let top_mm = prompt_u32_in("Width Top (mm)", w_min, w_max, base.top_mm);

    let thickness_names: Vec<String> = DoorThickness::ALL.iter().map(|t| t.to_string()).collect();
    let thickness_refs: Vec<&str> = thickness_names.iter().map(String::as_str).collect();
    let default_idx = DoorThickness::ALL
        .iter()
        .position(|t| *t == base.thickness)
        .unwrap_or(1);
    let thickness = DoorThickness::ALL[prompt_select("Door Thickness", &thickness_refs, default_idx)];

    let (e_min, e_max) = EFFICIENCY_RANGE;
    let efficiency = prompt_f64_in("Efficiency", e_min, e_max, base.efficiency);

    let opening = OpeningSpec {
        left_mm,
        centre_mm,
        right_mm,
        bottom_mm,
        middle_mm,
        top_mm,
        thickness,
        efficiency,
    };
    opening.validate()?;
    Ok(opening)
}

fn prompt_cutting_list(loaded: Option<&Job>) -> QuoteResult<(DoorStyle, Vec<CuttingListEntry>)> {
    println!("Step 2 - Cutting List");

    let style_names: Vec<&str> = DoorStyle::ALL.iter().map(|s| s.display_name()).collect();
    let default_idx = loaded
        .and_then(|j| DoorStyle::ALL.iter().position(|s| *s == j.quote.preset))
        .unwrap_or(0);
    let preset = DoorStyle::ALL[prompt_select("Preset Type", &style_names, default_idx)];

    // A loaded job's edited list only makes sense if the preset was kept.
    let mut list = match loaded {
        Some(job) if job.quote.preset == preset => job.quote.cutting_list.clone(),
        _ => preset.preset_list(),
    };

    if !list.is_empty() {
        println!("Components:");
        for (i, entry) in list.iter().enumerate() {
            println!(
                "  {}. {} ({}, {} x {} mm, qty {})",
                i + 1,
                entry.name,
                entry.material,
                entry.length_mm,
                entry.width_mm,
                entry.quantity
            );
        }
        if prompt_yes_no("Edit components?", false) {
            for i in 0..list.len() {
                let edited = prompt_component(Some(&list[i]))?;
                list[i] = edited;
            }
        }
    }

    while prompt_yes_no("Add a component?", false) {
        list.push(prompt_component(None)?);
    }

    Ok((preset, list))
}

fn prompt_component(prefill: Option<&CuttingListEntry>) -> QuoteResult<CuttingListEntry> {
    let base = prefill.cloned().unwrap_or_else(|| {
        CuttingListEntry::new("", PanelMaterial::Hdf, 1000, 100, 1)
    });

    let name = prompt_string(&format!("  Name [{}]: ", base.name), &base.name);
    let material_names: Vec<&str> = PanelMaterial::ALL.iter().map(|m| m.display_name()).collect();
    let default_idx = PanelMaterial::ALL
        .iter()
        .position(|m| *m == base.material)
        .unwrap_or(0);
    let material = PanelMaterial::ALL[prompt_select("  Material", &material_names, default_idx)];

    let (l_min, l_max) = LENGTH_RANGE_MM;
    let (w_min, w_max) = COMPONENT_WIDTH_RANGE_MM;
    let (q_min, q_max) = QUANTITY_RANGE;
    // Preset rows may sit outside the edit bounds (Flush frame width,
    // Louver count); clamp the defaults so re-prompting can't fail.
    let length_mm = prompt_u32_in("  Length (mm)", l_min, l_max, base.length_mm.clamp(l_min, l_max));
    let width_mm = prompt_u32_in("  Width (mm)", w_min, w_max, base.width_mm.clamp(w_min, w_max));
    let quantity = prompt_u32_in("  Qty", q_min, q_max, base.quantity.clamp(q_min, q_max));

    let entry = CuttingListEntry::new(name, material, length_mm, width_mm, quantity);
    entry.validate()?;
    Ok(entry)
}

fn prompt_hardware(prefill: Option<&HardwareSelection>) -> QuoteResult<HardwareSelection> {
    println!("Step 3 - Hardware");
    let modes = ["Standard", "Custom"];
    let default_idx = if prefill.is_some() { 1 } else { 0 };
    let mode = match prompt_select("Hardware", &modes, default_idx) {
        0 => HardwareMode::Standard,
        _ => HardwareMode::Custom,
    };

    if mode == HardwareMode::Standard {
        return Ok(HardwareSelection::standard());
    }

    let base = prefill.cloned().unwrap_or_default();
    let mut quantities = [0u32; 5];
    for (slot, item) in quantities.iter_mut().zip(HardwareItem::ALL) {
        let (min, max) = item.quantity_range();
        *slot = prompt_u32_in(item.display_name(), min, max, base.quantity(item));
    }
    let [hinges, lockset, handle, screws, foam_brush] = quantities;
    HardwareSelection::custom(hinges, lockset, handle, screws, foam_brush)
}

// ============================================================================
// Prompt helpers
// ============================================================================

fn read_line() -> String {
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

fn prompt_string(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }
    let input = read_line();
    if input.is_empty() {
        default.to_string()
    } else {
        input
    }
}

fn prompt_u32_in(prompt: &str, min: u32, max: u32, default: u32) -> u32 {
    loop {
        print!("{} ({}-{}) [{}]: ", prompt, min, max, default);
        if io::stdout().flush().is_err() {
            return default;
        }
        let input = read_line();
        if input.is_empty() {
            return default;
        }
        match input.parse::<u32>() {
            Ok(v) if v >= min && v <= max => return v,
            _ => println!("  Enter a number between {} and {}.", min, max),
        }
    }
}

fn prompt_f64_in(prompt: &str, min: f64, max: f64, default: f64) -> f64 {
    loop {
        print!("{} ({:.2}-{:.2}) [{:.2}]: ", prompt, min, max, default);
        if io::stdout().flush().is_err() {
            return default;
        }
        let input = read_line();
        if input.is_empty() {
            return default;
        }
        match input.parse::<f64>() {
            Ok(v) if v >= min && v <= max => return v,
            _ => println!("  Enter a number between {:.2} and {:.2}.", min, max),
        }
    }
}

fn prompt_select(prompt: &str, options: &[&str], default_idx: usize) -> usize {
    println!("{}:", prompt);
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    loop {
        print!("Select (1-{}) [{}]: ", options.len(), default_idx + 1);
        if io::stdout().flush().is_err() {
            return default_idx;
        }
        let input = read_line();
        if input.is_empty() {
            return default_idx;
        }
        match input.parse::<usize>() {
            Ok(v) if v >= 1 && v <= options.len() => return v - 1,
            _ => println!("  Enter a number between 1 and {}.", options.len()),
        }
    }
}

fn prompt_yes_no(prompt: &str, default: bool) -> bool {
    let hint = if default { "Y/n" } else { "y/N" };
    print!("{} [{}]: ", prompt, hint);
    if io::stdout().flush().is_err() {
        return default;
    }
    match read_line().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Default PDF filename for a job id, with filesystem-unfriendly
/// characters replaced (job ids contain spaces and colons).
fn default_pdf_path(job_id: &str) -> PathBuf {
    let safe: String = job_id
        .chars()
        .map(|c| match c {
            ' ' => '_',
            ':' => '-',
            c => c,
        })
        .collect();
    PathBuf::from(format!("quote_{}.pdf", safe))
}
