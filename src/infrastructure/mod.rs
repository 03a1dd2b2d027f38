//! 基础设施层
//!
//! - `JsExecutor`：唯一持有 Page 的对象
//! - `surface`：页面观察 / 操作接口及其浏览器实现
//! - `polling`：等待出现 / 等待消失

pub mod js_executor;
pub mod polling;
pub mod surface;

pub use js_executor::JsExecutor;
pub use polling::{await_appearance, await_disappearance, PollSpec};
pub use surface::{ChromiumSurface, DomHandle, MatchCase, Scope, UiSurface};
