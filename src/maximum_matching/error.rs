use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    #[error("self-loop on node {0}: a node cannot be matched with itself")]
    SelfLoop(String),
    #[error("weight {0} is outside the supported range of an eighth of the weight type")]
    WeightOutOfRange(String),
}
