//! # Batch Source Import
//!
//! 将一批链接逐个导入到只支持单条添加的网页界面（NotebookLM“添加来源”）
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//! - `UiSurface` - 查找 / 点击 / 输入，浏览器实现为 `ChromiumSurface`
//! - `polling` - 等待元素出现 / 消失
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条链接
//! - `SourceSteps` - 打开对话框、选择类别、提交链接、等待完成、清理
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条链接"的完整处理流程
//! - `ItemCtx` - 上下文封装（第几条 / 共几条）
//! - `ItemFlow` - 流程编排（打开 → 选择 → 提交 → 等待，失败时清理）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_controller` - 批次状态机，防重入，失败后询问是否继续
//! - `orchestrator/app` - 应用入口，管理浏览器资源
//!
//! 展示层（`presentation/`）只通过 `Presenter` 接口与编排层交互。

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod presentation;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use config::{Config, Profile};
pub use error::{ImportError, ImportResult};
pub use infrastructure::{ChromiumSurface, JsExecutor, MatchCase, Scope, UiSurface};
pub use models::{normalize, BatchPhase, BatchResult, Decision, ImportOutcome, ImportRequest};
pub use orchestrator::{App, BatchController};
pub use presentation::{Presenter, StatusLine, Tone};
pub use workflow::{ItemCtx, ItemFlow};
