use thiserror::Error;

pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Graph error: {0}")]
    Graph(#[from] symgraph_graph::GraphError),
}
