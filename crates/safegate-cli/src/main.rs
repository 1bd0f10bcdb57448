//! SafeGate CLI — operator tooling around the identity core.
//!
//! `derive` prints the login identifier for a tenant/unit pair; `plan`
//! previews an onboarding run (tenant id, document paths, login ids) without
//! touching any store. Both are thin invocations of safegate-core.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use safegate_core::models::Role;
use safegate_core::{derive_login_id, paths, tenant_id_from_name};

#[derive(Parser)]
#[command(name = "safegate", about = "SafeGate identity tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived login identifier for a tenant/unit pair
    Derive {
        /// Tenant display name, e.g. "Green Valley Apartments"
        #[arg(long)]
        tenant: String,
        /// Unit identifier, e.g. "101"
        #[arg(long)]
        unit: String,
    },
    /// Preview an onboarding run as JSON without writing anything
    Plan {
        /// Tenant display name
        #[arg(long)]
        tenant: String,
        /// Comma-separated unit identifiers, e.g. "100,101,102"
        #[arg(long)]
        units: String,
    },
}

#[derive(Serialize)]
struct PlannedAccount {
    login_id: String,
    role: Role,
    unit: String,
}

#[derive(Serialize)]
struct OnboardingPlan {
    tenant_id: String,
    tenant_doc: String,
    accounts: Vec<PlannedAccount>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safegate=info".into()),
        )
        .init();
}

fn build_plan(tenant: &str, units: &[String]) -> OnboardingPlan {
    let tenant_id = tenant_id_from_name(tenant);
    let mut accounts = vec![PlannedAccount {
        login_id: derive_login_id(tenant, "000"),
        role: Role::Security,
        unit: "000".to_string(),
    }];
    for unit in units {
        accounts.push(PlannedAccount {
            login_id: derive_login_id(tenant, unit),
            role: Role::Resident,
            unit: unit.clone(),
        });
    }
    OnboardingPlan {
        tenant_doc: paths::tenant_doc(&tenant_id),
        tenant_id,
        accounts,
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Derive { tenant, unit } => {
            println!("{}", derive_login_id(&tenant, &unit));
        }
        Commands::Plan { tenant, units } => {
            let units: Vec<String> = units
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            let plan = build_plan(&tenant, &units);
            let rendered =
                serde_json::to_string_pretty(&plan).context("failed to render plan")?;
            println!("{}", rendered);
        }
    }
    Ok(())
}
