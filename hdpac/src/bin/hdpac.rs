use clap::{
    Args,
    Parser,
    Subcommand,
};
use hdpac::{
    backend::MemoryBackend,
    gate,
    platform::Builder as PlatformBuilder,
    Platform,
};
use hdpcore::ac::{
    assignment::RoleAssignment,
    policy::Policy,
    resource::ResourceKind,
};
use hdprbac::{
    Hints,
    RoleCatalog,
};
use std::{
    path::PathBuf,
    sync::Arc,
};

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// The JSON document holding users, deployments and organizations
    #[clap(long, value_name = "HDPAC_STORE", env = "HDPAC_STORE")]
    store: PathBuf,
    #[clap(long, value_name = "HDPAC_DEFAULT_LOCALE", env = "HDPAC_DEFAULT_LOCALE", default_value = "en")]
    default_locale: String,
    #[clap(long, value_name = "HDPAC_LOCALES", env = "HDPAC_LOCALES", value_delimiter = ',')]
    locales: Vec<String>,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Args)]
struct HintArgs {
    #[arg(long)]
    deployment_id: Option<String>,
    #[arg(long)]
    organization_id: Option<String>,
    #[arg(long)]
    patient_id: Option<String>,
}

impl From<HintArgs> for Hints {
    fn from(args: HintArgs) -> Self {
        Hints {
            deployment_id: args.deployment_id,
            organization_id: args.organization_id,
            patient_id: args.patient_id,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the subject resolved for the user
    #[command(arg_required_else_help = true)]
    Resolve {
        user_id: String,
        #[command(flatten)]
        hints: HintArgs,
    },
    /// Check whether the user holds every one of the policies
    #[command(arg_required_else_help = true)]
    Enforce {
        user_id: String,
        #[arg(required = true)]
        policies: Vec<Policy>,
        #[command(flatten)]
        hints: HintArgs,
    },
    /// Assign a role to a user on behalf of the submitter
    #[command(arg_required_else_help = true)]
    Assign {
        submitter: String,
        user_id: String,
        role_id: String,
        resource_id: String,
        #[arg(long)]
        kind: Option<ResourceKind>,
        #[command(flatten)]
        hints: HintArgs,
    },
    /// List the built-in roles
    Roles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("hdpac")
        .module("hdprbac")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let backend = Arc::new(MemoryBackend::from_json(
        &tokio::fs::read_to_string(&args.store).await?
    )?);
    let mut builder = PlatformBuilder::new()
        .shared_ac_platform(backend.clone())
        .default_locale(args.default_locale);
    if !args.locales.is_empty() {
        builder = builder.supported_locales(args.locales);
    }
    let platform = builder.build()?;

    match args.command {
        Commands::Resolve { user_id, hints } => {
            resolve(&platform, user_id, hints.into()).await?;
        }
        Commands::Enforce { user_id, policies, hints } => {
            enforce(&platform, user_id, policies, hints.into()).await?;
        }
        Commands::Assign { submitter, user_id, role_id, resource_id, kind, hints } => {
            let ra = RoleAssignment::create(&role_id, &resource_id, kind)?;
            let submitter = platform.resolved_subject(
                platform.get_user(&submitter).await?,
                hints.into(),
            ).await?;
            let user = platform.add_roles(&submitter, &user_id, vec![ra]).await?;
            tokio::fs::write(&args.store, backend.to_json()?).await?;
            println!("user {user_id} now holds:");
            for ra in user.roles.iter() {
                println!("- {ra}");
            }
        }
        Commands::Roles => {
            let catalog = RoleCatalog::builtin();
            for (name, role) in catalog.all() {
                let scope = match (
                    catalog.is_deployment_role(name.as_str()),
                    catalog.is_organization_role(name.as_str()),
                ) {
                    (true, true) => "deployment, organization",
                    (true, false) => "deployment",
                    _ => "organization",
                };
                println!(
                    "{name} ({}): {:?} [{scope}]",
                    catalog.role_repr(name.as_str()),
                    role.user_type,
                );
            }
        }
    }

    Ok(())
}

async fn resolve(
    platform: &Platform,
    user_id: String,
    hints: Hints,
) -> anyhow::Result<()> {
    let subject = platform.subject(platform.get_user(&user_id).await?, hints).await?;
    println!("{subject}");
    match subject.role() {
        Some(role) => println!("role: {role}"),
        None => println!("role: unresolved"),
    }
    println!("deployment ids: {:?}", subject.deployment_ids(false));
    println!("organization ids: {:?}", subject.organization_ids());
    if subject.is_proxy() {
        println!("participants: {:?}", subject.proxy_participant_ids());
        if let Some(status) = subject.proxy_link_status().await? {
            println!("proxy status: {status:?}");
        }
    }
    if subject.is_user() {
        let proxies = subject.assigned_proxies().await?;
        println!(
            "proxies: {:?}",
            proxies.iter().map(|user| user.id.as_str()).collect::<Vec<_>>(),
        );
    }
    Ok(())
}

async fn enforce(
    platform: &Platform,
    user_id: String,
    policies: Vec<Policy>,
    hints: Hints,
) -> anyhow::Result<()> {
    let subject = platform.resolved_subject(
        platform.get_user(&user_id).await?,
        hints,
    ).await?;
    match gate::enforce(&subject, policies) {
        Ok(()) => println!("granted"),
        Err(e) if e.is_permission_denied() => println!("denied: {e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
