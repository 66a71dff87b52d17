use ces_rewards::RewardError;
use ces_store::StoreError;
use ces_types::ParamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid parameters: {0}")]
    Param(#[from] ParamError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("reward error: {0}")]
    Reward(#[from] RewardError),

    #[error("config error: {0}")]
    Config(String),

    #[error("artifact key encoding failed: {0}")]
    KeyEncoding(#[from] bincode::Error),
}
