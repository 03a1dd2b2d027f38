//! 页面表面 - 基础设施层
//!
//! 导入流程只通过 [`UiSurface`] 观察和操作目标页面：查找元素、点击、输入、
//! 读取禁用状态。浏览器实现为 [`ChromiumSurface`]，测试中可以替换为脚本化的
//! 假页面。

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::{ImportError, ImportResult};
use crate::infrastructure::JsExecutor;

/// 查找范围：整个文档，或某个元素的子树
pub enum Scope<'a, H> {
    Document,
    Within(&'a H),
}

impl<H> Clone for Scope<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Scope<'_, H> {}

impl<H: Debug> Debug for Scope<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Document => f.write_str("Document"),
            Scope::Within(handle) => f.debug_tuple("Within").field(handle).finish(),
        }
    }
}

/// 可被轮询观察的目标页面
///
/// 页面不提供任何完成回调，所有状态都只能通过反复查询得到。
#[async_trait]
pub trait UiSurface: Send + Sync {
    /// 元素句柄
    type Handle: Clone + Debug + Send + Sync;

    /// 查找第一个匹配且可见的元素
    async fn find_visible(
        &self,
        selector: &str,
        scope: Scope<'_, Self::Handle>,
    ) -> ImportResult<Option<Self::Handle>>;

    /// 元素是否仍存在于 DOM 中（不要求可见）
    async fn is_present(&self, selector: &str, scope: Scope<'_, Self::Handle>) -> ImportResult<bool>;

    /// 查找所有匹配的元素
    async fn find_all(
        &self,
        selector: &str,
        scope: Scope<'_, Self::Handle>,
    ) -> ImportResult<Vec<Self::Handle>>;

    /// 在 `scope` 内查找文本包含 `text` 的元素，匹配规则见 [`text_matches`]
    async fn find_by_text(
        &self,
        scope: &Self::Handle,
        selector: &str,
        text: &str,
        case: MatchCase,
    ) -> ImportResult<Option<Self::Handle>>;

    async fn click(&self, handle: &Self::Handle) -> ImportResult<()>;

    /// 写入输入框的值并派发冒泡的 `input` 事件，让页面自身的校验逻辑生效
    async fn set_value(&self, handle: &Self::Handle, value: &str) -> ImportResult<()>;

    async fn is_disabled(&self, handle: &Self::Handle) -> ImportResult<bool>;
}

/// 文本匹配是否区分大小写
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    /// 类别选项
    Sensitive,
    /// 按钮
    Insensitive,
}

/// 文本匹配：去掉首尾空白后的子串匹配
pub fn text_matches(element_text: &str, label: &str, case: MatchCase) -> bool {
    let text = element_text.trim();
    match case {
        MatchCase::Sensitive => text.contains(label),
        MatchCase::Insensitive => text.to_lowercase().contains(&label.to_lowercase()),
    }
}

/// 页面元素属性名，用于在多次脚本调用之间标识同一个元素
const HANDLE_ATTR: &str = "data-batch-import-handle";

/// 所有脚本共用的辅助函数
const PRELUDE: &str = r#"
    const __attr = 'data-batch-import-handle';
    const __tag = (el) => {
        if (!el.hasAttribute(__attr)) {
            window.__batchImportSeq = (window.__batchImportSeq || 0) + 1;
            el.setAttribute(__attr, String(window.__batchImportSeq));
        }
        return el.getAttribute(__attr);
    };
    const __matches = (el, text, ignoreCase) => {
        const content = el.textContent.trim();
        return ignoreCase
            ? content.toLowerCase().includes(text.toLowerCase())
            : content.includes(text);
    };
"#;

/// 浏览器中的元素句柄（对应元素上的 `data-batch-import-handle` 属性值）
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(transparent)]
pub struct DomHandle(String);

impl DomHandle {
    fn css(&self) -> String {
        format!("[{}=\"{}\"]", HANDLE_ATTR, self.0)
    }
}

/// 基于 chromiumoxide 的页面实现
///
/// 每个操作都是一次 `JsExecutor::eval`，句柄通过元素属性在调用之间保持。
pub struct ChromiumSurface {
    executor: JsExecutor,
}

impl ChromiumSurface {
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }

    fn root_js(scope: Scope<'_, DomHandle>) -> ImportResult<String> {
        match scope {
            Scope::Document => Ok("document".to_string()),
            Scope::Within(handle) => Ok(format!(
                "document.querySelector({})",
                serde_json::to_string(&handle.css())?
            )),
        }
    }

    /// 对句柄对应的元素执行一段脚本，元素已不存在时返回错误
    async fn with_element<T: serde::de::DeserializeOwned>(
        &self,
        handle: &DomHandle,
        body: &str,
    ) -> ImportResult<T> {
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({});
                if (!el) return {{ missing: true }};
                {}
            }})()
            "#,
            serde_json::to_string(&handle.css())?,
            body
        );

        let value = self.executor.eval(js_code).await?;
        if value.get("missing").is_some() {
            return Err(ImportError::Browser(format!(
                "element {} is no longer attached",
                handle.0
            )));
        }
        Ok(serde_json::from_value(value.get("value").cloned().unwrap_or_default())?)
    }
}

#[async_trait]
impl UiSurface for ChromiumSurface {
    type Handle = DomHandle;

    async fn find_visible(
        &self,
        selector: &str,
        scope: Scope<'_, DomHandle>,
    ) -> ImportResult<Option<DomHandle>> {
        let js_code = format!(
            r#"
            (() => {{
                {}
                const root = {};
                if (!root) return null;
                const el = root.querySelector({});
                if (!el || el.offsetParent === null) return null;
                return __tag(el);
            }})()
            "#,
            PRELUDE,
            Self::root_js(scope)?,
            serde_json::to_string(selector)?
        );
        self.executor.eval_as(js_code).await
    }

    async fn is_present(&self, selector: &str, scope: Scope<'_, DomHandle>) -> ImportResult<bool> {
        let js_code = format!(
            r#"
            (() => {{
                const root = {};
                return !!root && !!root.querySelector({});
            }})()
            "#,
            Self::root_js(scope)?,
            serde_json::to_string(selector)?
        );
        self.executor.eval_as(js_code).await
    }

    async fn find_all(
        &self,
        selector: &str,
        scope: Scope<'_, DomHandle>,
    ) -> ImportResult<Vec<DomHandle>> {
        let js_code = format!(
            r#"
            (() => {{
                {}
                const root = {};
                if (!root) return [];
                return Array.from(root.querySelectorAll({})).map(__tag);
            }})()
            "#,
            PRELUDE,
            Self::root_js(scope)?,
            serde_json::to_string(selector)?
        );
        self.executor.eval_as(js_code).await
    }

    async fn find_by_text(
        &self,
        scope: &DomHandle,
        selector: &str,
        text: &str,
        case: MatchCase,
    ) -> ImportResult<Option<DomHandle>> {
        let js_code = format!(
            r#"
            (() => {{
                {}
                const root = {};
                if (!root) return null;
                const el = Array.from(root.querySelectorAll({}))
                    .find((candidate) => __matches(candidate, {}, {}));
                return el ? __tag(el) : null;
            }})()
            "#,
            PRELUDE,
            Self::root_js(Scope::Within(scope))?,
            serde_json::to_string(selector)?,
            serde_json::to_string(text)?,
            case == MatchCase::Insensitive
        );
        self.executor.eval_as(js_code).await
    }

    async fn click(&self, handle: &DomHandle) -> ImportResult<()> {
        self.with_element::<bool>(handle, "el.click(); return { value: true };")
            .await?;
        Ok(())
    }

    async fn set_value(&self, handle: &DomHandle, value: &str) -> ImportResult<()> {
        let body = format!(
            "el.value = {}; el.dispatchEvent(new Event('input', {{ bubbles: true }})); return {{ value: true }};",
            serde_json::to_string(value)?
        );
        self.with_element::<bool>(handle, &body).await?;
        Ok(())
    }

    async fn is_disabled(&self, handle: &DomHandle) -> ImportResult<bool> {
        self.with_element(handle, "return { value: !!el.disabled };")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_matches_trims_and_ignores_case() {
        assert!(text_matches("  YouTube  ", "YouTube", MatchCase::Insensitive));
        assert!(text_matches("\n add YOUTUBE link", "youtube", MatchCase::Insensitive));
        assert!(text_matches("Cancel", "cancel", MatchCase::Insensitive));
        assert!(!text_matches("Website", "YouTube", MatchCase::Insensitive));
    }

    #[test]
    fn test_text_matches_case_sensitive() {
        assert!(text_matches("  YouTube  ", "YouTube", MatchCase::Sensitive));
        assert!(!text_matches("youtube", "YouTube", MatchCase::Sensitive));
        assert!(!text_matches("YOUTUBE", "YouTube", MatchCase::Sensitive));
    }

    #[test]
    fn test_dom_handle_css() {
        let handle = DomHandle("12".to_string());
        assert_eq!(handle.css(), r#"[data-batch-import-handle="12"]"#);
    }
}
