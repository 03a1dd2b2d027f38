//! 轮询原语 - 基础设施层
//!
//! 页面没有事件通知，只能按固定间隔反复采样。两个原语：
//! - [`await_appearance`]：等到探测结果出现，超时返回 `ImportError::Timeout`
//! - [`await_disappearance`]：等到目标消失，超时返回 `false`（仍然存在是调用方
//!   需要显式处理的正常结果）
//!
//! 两次采样之间使用 `tokio::time::sleep` 让出执行权，不会忙等。

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::error::{ImportError, ImportResult};
use crate::infrastructure::surface::{Scope, UiSurface};

/// 轮询参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSpec {
    pub timeout: Duration,
    pub interval: Duration,
}

impl PollSpec {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

/// 反复执行 `probe` 直到返回 `Some`
///
/// # 参数
/// - `what`: 等待对象的描述，用于超时错误信息
/// - `spec`: 超时与轮询间隔
/// - `probe`: 探测函数，返回 `Some(handle)` 表示目标已出现
pub async fn await_appearance<T, F, Fut>(what: &str, spec: PollSpec, mut probe: F) -> ImportResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ImportResult<Option<T>>>,
{
    let start = Instant::now();

    while start.elapsed() < spec.timeout {
        if let Some(found) = probe().await? {
            trace!("{} 已出现 ({:?})", what, start.elapsed());
            return Ok(found);
        }
        sleep(spec.interval).await;
    }

    debug!("等待 {} 超时 ({:?})", what, spec.timeout);
    Err(ImportError::timeout(what, spec.timeout))
}

/// 反复执行 `probe` 直到目标不再存在
///
/// `probe` 返回 `true` 表示目标仍然存在。
///
/// # 返回
/// 在超时前消失返回 `true`，超时时仍存在返回 `false`
pub async fn await_disappearance<F, Fut>(spec: PollSpec, mut probe: F) -> ImportResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ImportResult<bool>>,
{
    let start = Instant::now();

    while start.elapsed() < spec.timeout {
        if !probe().await? {
            return Ok(true);
        }
        sleep(spec.interval).await;
    }

    Ok(false)
}

/// 等待 `scope` 内出现匹配 `selector` 的可见元素
pub async fn wait_for_element<S>(
    surface: &S,
    selector: &str,
    scope: Scope<'_, S::Handle>,
    spec: PollSpec,
) -> ImportResult<S::Handle>
where
    S: UiSurface + ?Sized,
{
    let what = format!("element: \"{}\"", selector);
    await_appearance(&what, spec, || surface.find_visible(selector, scope)).await
}

/// 等待 `scope` 内匹配 `selector` 的元素从 DOM 中消失
pub async fn wait_for_element_to_disappear<S>(
    surface: &S,
    selector: &str,
    scope: Scope<'_, S::Handle>,
    spec: PollSpec,
) -> ImportResult<bool>
where
    S: UiSurface + ?Sized,
{
    await_disappearance(spec, || surface.is_present(selector, scope)).await
}
