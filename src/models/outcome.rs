//! 单条链接与整个批次的处理结果

/// 单条链接的导入结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Succeeded,
    /// 失败原因为第一个出错步骤的错误信息
    Failed(String),
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Succeeded)
    }
}

/// 某条链接失败后用户的选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Continue,
    Stop,
}

/// 批次状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPhase {
    #[default]
    Idle,
    Running,
    /// 用户在失败后选择停止
    Stopped,
    /// 所有链接都已尝试
    Completed,
}

/// 失败的链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    /// 在批次中的位置（从1开始）
    pub index: usize,
    pub link: String,
    pub reason: String,
}

/// 批次统计
///
/// 逐条累加，循环结束时定型。`succeeded <= attempted <= total` 始终成立。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchResult {
    pub total: usize,
    pub succeeded: usize,
    /// 已尝试的链接数
    pub attempted: usize,
    pub stopped_early: bool,
    pub failures: Vec<FailedItem>,
}

impl BatchResult {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// 记录一条链接的结果
    pub fn record(&mut self, link: &str, outcome: &ImportOutcome) {
        self.attempted += 1;
        match outcome {
            ImportOutcome::Succeeded => self.succeeded += 1,
            ImportOutcome::Failed(reason) => self.failures.push(FailedItem {
                index: self.attempted,
                link: link.to_string(),
                reason: reason.clone(),
            }),
        }
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    /// 全部成功（且至少有一条）
    pub fn is_full_success(&self) -> bool {
        self.total > 0 && self.succeeded == self.total
    }

    /// 循环结束后的状态
    pub fn phase(&self) -> BatchPhase {
        if self.stopped_early {
            BatchPhase::Stopped
        } else {
            BatchPhase::Completed
        }
    }
}
