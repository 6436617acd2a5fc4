use anyhow::{Context, Result};
use nautylus::{HybridStore, NautylusConfig, NodeId};
use tracing::{info, warn};

const DEMO_DIMENSION: usize = 3;

/// Demo items and their embeddings
const ITEMS: [(&str, [f32; DEMO_DIMENSION]); 6] = [
    ("alba", [0.1, 0.2, 0.3]),
    ("boreal", [0.2, 0.1, 0.4]),
    ("cetus", [0.9, 0.8, 0.7]),
    ("delta", [0.85, 0.75, 0.65]),
    ("ember", [0.3, 0.4, 0.2]),
    ("fjord", [0.0, 0.1, 0.0]),
];

/// (from, to, weight) as indices into `ITEMS`
const LINKS: [(usize, usize, f64); 4] = [(0, 1, 1.0), (0, 4, 0.7), (2, 3, 0.9), (5, 0, 0.4)];

const LINK_TYPE: u64 = 1;
const TOP_K: usize = 3;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Nautylus v{}", nautylus::version());
    println!("==========================================");
    println!();

    let config = load_config()?;
    let (store, items) = build_demo(&config)?;

    println!("=== Graph Statistics ===");
    println!("{}", serde_json::to_string_pretty(&store.graph().statistics())?);
    println!();

    println!("=== Similar Nodes (k = {}) ===", TOP_K);
    for (name, id) in &items {
        let similar = store.similar_nodes(*id, TOP_K)?;
        println!("query: {} ({})", name, id);
        for (rank, hit) in similar.iter().enumerate() {
            println!(
                "  {}) {} dist={:.4} connected={}",
                rank + 1,
                name_of(&items, hit.id),
                hit.distance,
                if hit.connected { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}

/// Defaults, or the YAML file named by `NAUTYLUS_CONFIG`
fn load_config() -> Result<NautylusConfig> {
    let mut config = match std::env::var_os("NAUTYLUS_CONFIG") {
        Some(path) => NautylusConfig::load(&path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => NautylusConfig::default(),
    };

    if config.vector.dimension != DEMO_DIMENSION {
        warn!(
            "Configured dimension {} does not match the demo data, using {}",
            config.vector.dimension, DEMO_DIMENSION
        );
        config.vector.dimension = DEMO_DIMENSION;
    }
    Ok(config)
}

fn build_demo(config: &NautylusConfig) -> Result<(HybridStore, Vec<(&'static str, NodeId)>)> {
    let mut store = HybridStore::with_config(config)?;

    let mut items = Vec::with_capacity(ITEMS.len());
    for (name, vector) in ITEMS.iter() {
        let id = store
            .create_node_with_vector(vector)
            .with_context(|| format!("failed to create {}", name))?;
        items.push((*name, id));
    }

    for &(from, to, weight) in LINKS.iter() {
        store
            .graph_mut()
            .create_edge(items[from].1, items[to].1, LINK_TYPE, weight, 0)?;
    }

    info!(
        "Demo graph ready: {} nodes, {} edges",
        store.graph().node_count(),
        store.graph().edge_count()
    );
    Ok((store, items))
}

fn name_of(items: &[(&'static str, NodeId)], id: NodeId) -> &'static str {
    items
        .iter()
        .find(|(_, item)| *item == id)
        .map(|(name, _)| *name)
        .unwrap_or("unknown")
}
