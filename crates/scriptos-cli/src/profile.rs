//! Creator profile and automation flow command handlers.

use clap::Subcommand;
use scriptos_core::{AutomationFlow, ChannelIdentity, NodePosition, NodeType, UserProfile};
use scriptos_studio::Studio;

/// Sub-commands available under `profile`.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the stored profile and analytics
    Show,
    /// Update the channel identity injected into every prompt
    Identity {
        /// Brand voice, e.g. "Sarcastic, Nihilistic"
        #[arg(long)]
        voice: Option<String>,
        /// Who the channel is for
        #[arg(long)]
        audience: Option<String>,
        /// What the channel stands for
        #[arg(long)]
        manifesto: Option<String>,
    },
    /// Pull the authenticated channel and its analytics
    Sync {
        /// OAuth access token (defaults to `YOUTUBE_ACCESS_TOKEN`)
        #[arg(long)]
        token: Option<String>,
    },
}

/// Sub-commands available under `flow`.
#[derive(Debug, Subcommand)]
pub enum FlowCommands {
    /// List stored flows
    List,
    /// Show a flow's nodes and edges
    Show { id: String },
    /// Append a node to a flow
    AddNode {
        flow_id: String,
        /// trigger-trend, filter-style, action-script, output-notify or logic-delay
        #[arg(long)]
        kind: NodeType,
        #[arg(long)]
        label: String,
        /// Canvas position; defaults to the right of the last node
        #[arg(long)]
        x: Option<f64>,
        #[arg(long, default_value_t = 150.0)]
        y: f64,
    },
    /// Connect two nodes of a flow
    Connect {
        flow_id: String,
        source: String,
        target: String,
    },
    /// Remove a node and every edge touching it
    RemoveNode { flow_id: String, node_id: String },
}

pub(crate) async fn run_profile(
    studio: &Studio,
    command: ProfileCommands,
    configured_token: Option<&str>,
) -> anyhow::Result<()> {
    match command {
        ProfileCommands::Show => print_profile(&studio.profile()?),
        ProfileCommands::Identity {
            voice,
            audience,
            manifesto,
        } => {
            let current = studio.profile()?.identity;
            let identity = merge_identity(current, voice, audience, manifesto);
            let profile = studio.set_identity(identity)?;
            print_profile(&profile);
        }
        ProfileCommands::Sync { token } => {
            let Some(token) = token.as_deref().or(configured_token) else {
                anyhow::bail!("no access token; pass --token or set YOUTUBE_ACCESS_TOKEN");
            };
            let profile = studio.sync_profile(token).await?;
            print_profile(&profile);
        }
    }
    Ok(())
}

/// Applies the given fields over `current`; omitted fields are kept.
pub(crate) fn merge_identity(
    current: ChannelIdentity,
    voice: Option<String>,
    audience: Option<String>,
    manifesto: Option<String>,
) -> ChannelIdentity {
    ChannelIdentity {
        brand_voice: voice.unwrap_or(current.brand_voice),
        target_audience: audience.unwrap_or(current.target_audience),
        manifesto: manifesto.unwrap_or(current.manifesto),
    }
}

pub(crate) fn run_flow(studio: &Studio, command: FlowCommands) -> anyhow::Result<()> {
    match command {
        FlowCommands::List => {
            println!("{:<38}{:<8}{:<7}NAME", "ID", "ACTIVE", "NODES");
            for flow in studio.flows()? {
                println!(
                    "{:<38}{:<8}{:<7}{}",
                    flow.id,
                    if flow.active { "yes" } else { "no" },
                    flow.nodes.len(),
                    flow.name
                );
            }
        }
        FlowCommands::Show { id } => print_flow(&studio.flow(&id)?),
        FlowCommands::AddNode {
            flow_id,
            kind,
            label,
            x,
            y,
        } => {
            let x = match x {
                Some(x) => x,
                None => next_column(&studio.flow(&flow_id)?),
            };
            let flow = studio.add_flow_node(&flow_id, kind, &label, NodePosition { x, y })?;
            print_flow(&flow);
        }
        FlowCommands::Connect {
            flow_id,
            source,
            target,
        } => print_flow(&studio.connect_flow_nodes(&flow_id, &source, &target)?),
        FlowCommands::RemoveNode { flow_id, node_id } => {
            print_flow(&studio.remove_flow_node(&flow_id, &node_id)?);
        }
    }
    Ok(())
}

/// Horizontal slot one column right of the rightmost node.
pub(crate) fn next_column(flow: &AutomationFlow) -> f64 {
    flow.nodes
        .iter()
        .map(|n| n.position.x)
        .reduce(f64::max)
        .map_or(100.0, |max| max + 350.0)
}

fn print_flow(flow: &AutomationFlow) {
    println!("{} ({})", flow.name, if flow.active { "active" } else { "paused" });
    for node in &flow.nodes {
        println!("  [{}] {:?}: {}", node.id, node.kind, node.data.label);
    }
    for edge in &flow.edges {
        println!("  {} -> {}", edge.source, edge.target);
    }
}

fn print_profile(profile: &UserProfile) {
    let dash = "\u{2014}";
    println!(
        "Channel:    {} {}",
        profile.channel_name.as_deref().unwrap_or(dash),
        profile.channel_handle.as_deref().unwrap_or("")
    );
    println!(
        "Subscribers: {}",
        profile.subscriber_count.as_deref().unwrap_or(dash)
    );
    println!();
    println!("IDENTITY");
    println!("Voice:      {}", non_blank(&profile.identity.brand_voice, dash));
    println!("Audience:   {}", non_blank(&profile.identity.target_audience, dash));
    println!("Manifesto:  {}", non_blank(&profile.identity.manifesto, dash));

    if let Some(analytics) = &profile.analytics {
        println!();
        println!("ANALYTICS");
        println!("Views:      {}", analytics.views);
        println!("Videos:     {}", analytics.videos);
        println!("Avg views:  {}", analytics.avg_views);
        match analytics.growth_rate {
            Some(rate) => println!("Growth:     {rate:+}% (28 days)"),
            None => println!("Growth:     {dash}"),
        }
    }
}

fn non_blank<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
