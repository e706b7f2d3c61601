//! 運行控制
//!
//! 取消令牌與牆鐘截止時間。檢查點落在層與層之間、料號與料號
//! 之間；觸發即以 `Cancelled` 中止，工作集隨所有權釋放。

use mrp_core::{MrpError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// 取消令牌（可複製到其他執行緒觸發）
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// 創建新的令牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 觸發取消
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// 檢查是否已取消
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// 一次運行的控制面：取消與截止
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    /// 取消令牌
    pub cancel: CancelToken,

    /// 牆鐘截止時間（超過即視同取消）
    pub deadline: Option<Instant>,
}

impl RunControl {
    /// 無限制的控制面
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// 建構器模式：掛上取消令牌
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// 建構器模式：設置截止時間
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// 檢查點：已取消或逾時則回傳 `Cancelled`
    pub fn checkpoint(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(MrpError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(MrpError::Cancelled);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cancel_token() {
        let control = RunControl::unbounded();
        assert!(control.checkpoint().is_ok());

        control.cancel.cancel();
        assert!(matches!(control.checkpoint(), Err(MrpError::Cancelled)));
    }

    #[test]
    fn test_deadline_breach() {
        let control =
            RunControl::unbounded().with_deadline(Instant::now() - Duration::from_secs(1));

        assert!(matches!(control.checkpoint(), Err(MrpError::Cancelled)));
    }

    #[test]
    fn test_token_shared_across_clones() {
        let token = CancelToken::new();
        let control = RunControl::unbounded().with_cancel(token.clone());

        token.cancel();
        assert!(control.cancel.is_cancelled());
    }
}
