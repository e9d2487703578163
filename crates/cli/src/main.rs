//! AutoGlue command-line interface.
//!
//! A thin wrapper over [`autoglue_client::AutoGlue`]: one subcommand
//! per resource, JSON to stdout. The session (token pair and active
//! organization) is stored under the user's configuration directory,
//! so it survives between invocations.

use std::io::Write as _;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use autoglue_client::AutoGlue;
use autoglue_domain::{CreateOrganizationRequest, CreateServerRequest, ServerRole};

#[derive(Parser)]
#[command(name = "autoglue", version, about = "AutoGlue API client")]
struct Cli {
    /// Base URL of the AutoGlue server.
    #[arg(long, env = "AUTOGLUE_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Log filter, e.g. "info" or "autoglue_application=debug".
    #[arg(long, env = "AUTOGLUE_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session.
    Login {
        /// Account email address.
        #[arg(long)]
        email: String,
        /// Account password; prefer the environment variable over the flag.
        #[arg(long, env = "AUTOGLUE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Revoke the session server-side and clear it locally.
    Logout,
    /// Show the session's identity summary.
    Me,
    /// Organization operations.
    Orgs {
        #[command(subcommand)]
        command: OrgsCommand,
    },
    /// Server operations.
    Servers {
        #[command(subcommand)]
        command: ServersCommand,
    },
    /// List the active organization's SSH keys.
    SshKeys,
    /// List the active organization's labels.
    Labels,
    /// List the active organization's taints.
    Taints,
    /// List the active organization's annotations.
    Annotations,
    /// List the active organization's node pools.
    NodePools,
    /// Cluster operations.
    Clusters {
        #[command(subcommand)]
        command: ClustersCommand,
    },
    /// DNS operations.
    Dns {
        #[command(subcommand)]
        command: DnsCommand,
    },
    /// List the active organization's load balancers.
    LoadBalancers,
    /// List the active organization's credentials.
    Credentials,
    /// Background-job administration.
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// List the admin action catalog.
    Actions,
    /// Show the server's build version.
    Version,
}

#[derive(Subcommand)]
enum ClustersCommand {
    /// List clusters, optionally filtered by a name search.
    List {
        /// Name search.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one cluster with its attachments.
    Get {
        /// Cluster id.
        id: Uuid,
    },
    /// List a cluster's action runs.
    Runs {
        /// Cluster id.
        id: Uuid,
    },
    /// Start an action against a cluster.
    Run {
        /// Cluster id.
        id: Uuid,
        /// Action id from the admin catalog.
        #[arg(long)]
        action_id: Uuid,
    },
}

#[derive(Subcommand)]
enum OrgsCommand {
    /// List organizations; selects the first one if none is active.
    List,
    /// Select the active organization.
    Select {
        /// Organization id.
        id: Uuid,
    },
    /// Create an organization.
    Create {
        /// Display name.
        #[arg(long)]
        name: String,
    },
    /// List an organization's members.
    Members {
        /// Organization id.
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum ServersCommand {
    /// List servers.
    List,
    /// Show one server.
    Get {
        /// Server id.
        id: Uuid,
    },
    /// Register a server.
    Create {
        /// Private network address.
        #[arg(long)]
        private_ip: String,
        /// User account for SSH access.
        #[arg(long)]
        ssh_user: String,
        /// Key used to reach the server.
        #[arg(long)]
        ssh_key_id: Uuid,
        /// Hostname, optional at registration time.
        #[arg(long)]
        hostname: Option<String>,
        /// Public address; required for bastions.
        #[arg(long)]
        public_ip: Option<String>,
        /// Role: master, worker or bastion.
        #[arg(long, default_value = "worker")]
        role: String,
    },
    /// Deregister a server.
    Delete {
        /// Server id.
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum DnsCommand {
    /// List managed domains.
    Domains,
    /// List a domain's record sets.
    Records {
        /// Domain id.
        domain_id: Uuid,
    },
}

#[derive(Subcommand)]
enum JobsCommand {
    /// List jobs.
    List,
    /// Show per-queue counts.
    Queues,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    if let Err(error) = run(cli).await {
        tracing::error!("fatal: {error:#}");
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn init_tracing(filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let glue = AutoGlue::builder(&cli.base_url)
        .build()
        .context("failed to set up the client")?;

    match cli.command {
        Command::Login { email, password } => {
            glue.auth().login(&email, &password).await?;
            // Pick a default organization so org-scoped commands work
            // immediately.
            let orgs = glue.orgs().list().await?;
            eprintln!(
                "logged in; {} organization(s), active: {}",
                orgs.len(),
                glue.org().get().unwrap_or_else(|| "none".to_string())
            );
        }
        Command::Logout => {
            glue.auth().logout().await;
            eprintln!("logged out");
        }
        Command::Me => print_json(&glue.auth().me().await?)?,
        Command::Orgs { command } => match command {
            OrgsCommand::List => print_json(&glue.orgs().list().await?)?,
            OrgsCommand::Select { id } => {
                glue.orgs().select(id)?;
                eprintln!("active organization: {id}");
            }
            OrgsCommand::Create { name } => {
                let request = CreateOrganizationRequest { name, domain: None };
                print_json(&glue.orgs().create(&request).await?)?;
            }
            OrgsCommand::Members { id } => print_json(&glue.orgs().members(id).await?)?,
        },
        Command::Servers { command } => match command {
            ServersCommand::List => print_json(&glue.servers().list().await?)?,
            ServersCommand::Get { id } => print_json(&glue.servers().get(id).await?)?,
            ServersCommand::Create {
                private_ip,
                ssh_user,
                ssh_key_id,
                hostname,
                public_ip,
                role,
            } => {
                let role: ServerRole = serde_json::from_value(serde_json::Value::String(role))
                    .context("role must be master, worker or bastion")?;
                let request = CreateServerRequest {
                    hostname,
                    public_ip_address: public_ip,
                    private_ip_address: private_ip,
                    ssh_user,
                    ssh_key_id,
                    role,
                };
                print_json(&glue.servers().create(&request).await?)?;
            }
            ServersCommand::Delete { id } => {
                glue.servers().delete(id).await?;
                eprintln!("deleted {id}");
            }
        },
        Command::SshKeys => print_json(&glue.ssh_keys().list().await?)?,
        Command::Labels => print_json(&glue.labels().list().await?)?,
        Command::Taints => print_json(&glue.taints().list().await?)?,
        Command::Annotations => print_json(&glue.annotations().list().await?)?,
        Command::NodePools => print_json(&glue.node_pools().list().await?)?,
        Command::Clusters { command } => match command {
            ClustersCommand::List { search } => {
                print_json(&glue.clusters().list(search.as_deref()).await?)?;
            }
            ClustersCommand::Get { id } => print_json(&glue.clusters().get(id).await?)?,
            ClustersCommand::Runs { id } => print_json(&glue.clusters().runs(id).await?)?,
            ClustersCommand::Run { id, action_id } => {
                print_json(&glue.clusters().run_action(id, action_id).await?)?;
            }
        },
        Command::Dns { command } => match command {
            DnsCommand::Domains => print_json(&glue.dns().list_domains().await?)?,
            DnsCommand::Records { domain_id } => {
                print_json(&glue.dns().list_records(domain_id).await?)?;
            }
        },
        Command::LoadBalancers => print_json(&glue.load_balancers().list().await?)?,
        Command::Credentials => print_json(&glue.credentials().list().await?)?,
        Command::Jobs { command } => match command {
            JobsCommand::List => {
                print_json(&glue.jobs().list(&autoglue_client::JobFilter::default()).await?)?;
            }
            JobsCommand::Queues => print_json(&glue.jobs().queues().await?)?,
        },
        Command::Actions => print_json(&glue.actions().list().await?)?,
        Command::Version => print_json(&glue.meta().version().await?)?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
