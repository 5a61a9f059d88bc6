use mute::graph::{Link, Node, NodeGraph, NodeId, SharedGraph};
use mute::render::List;
use mute::MessageKind;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Mute node graph v{}", mute::version());

    demo_node_graph()?;
    demo_shared_graph().await?;

    let kinds: Vec<MessageKind> = MessageKind::ALL.to_vec();
    info!("Protocol message kinds: {}", List(&kinds));

    Ok(())
}

fn demo_node_graph() -> anyhow::Result<()> {
    let graph = NodeGraph::new();

    for id in 1..=3 {
        graph.insert_node_at(Node::new(), NodeId::new(id))?;
    }
    let [n1, n2, n3] = [1, 2, 3].map(node_id);
    graph.insert_link(Link::new(n1, n2))?;
    graph.insert_link(Link::new(n2, n3))?;

    let middle = graph.lookup_node(n2)?;
    info!("{}", List(&middle.links()?));
    info!("{}", List(&middle.neighbors()?));

    let first = graph.lookup_node(n1)?;
    graph.erase_node(n1);
    if let Err(e) = first.links() {
        info!("After erasing {}: {}", first, e);
    }
    info!("Links left: {}", List(&graph.links()));

    match graph.insert_link(Link::new(n2, node_id(99))) {
        Ok(link) => warn!("Unexpectedly inserted {}", link),
        Err(e) => info!("Rejected: {}", e),
    }

    Ok(())
}

async fn demo_shared_graph() -> anyhow::Result<()> {
    let shared = SharedGraph::default();

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let graph = shared.clone();
        tasks.push(tokio::spawn(async move {
            graph.with(|g| g.insert_node(Node::new()).id()).await
        }));
    }
    for task in tasks {
        let id = task.await?;
        info!("Task inserted node {}", id);
    }

    let count = shared.with(|g| g.node_count()).await;
    info!("Shared graph holds {} nodes", count);
    Ok(())
}

fn node_id(id: u64) -> NodeId {
    NodeId::new(id).unwrap_or_else(|| unreachable!("demo ids are non-zero"))
}
