//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 加载链接和配置文件
//! - 管理浏览器资源（Browser、JsExecutor）
//! - 输出全局统计信息
//!
//! ### `batch_controller` - 批次控制器
//! - 防止重复启动（OrchestratorState）
//! - 逐条调用 ItemFlow
//! - 失败后询问继续 / 停止
//! - 全部成功时自动关闭
//!
//! ## 层次关系
//!
//! ```text
//! app (持有 Browser)
//!     ↓
//! batch_controller (处理 Vec<链接>)
//!     ↓
//! workflow::ItemFlow (处理单条链接)
//!     ↓
//! services::SourceSteps (能力层：打开对话框 / 选择类别 / 提交 / 等待完成)
//!     ↓
//! infrastructure (基础设施：轮询、UiSurface、JsExecutor)
//! ```

pub mod app;
pub mod batch_controller;

// 重新导出主要类型
pub use app::App;
pub use batch_controller::{BatchController, OrchestratorState, RunPermit};
