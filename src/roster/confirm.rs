use async_trait::async_trait;

/// Yes/no gate consulted before destructive operations.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl ConfirmationGate for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
