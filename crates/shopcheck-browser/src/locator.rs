//! Lazily resolved element locators.
//!
//! A [`Locator`] is a description, not a handle: a chain of [`Step`]s that is
//! re-resolved in the page every time it is used. That makes locators safe
//! to hold across navigations and re-renders, which the storefront does a
//! lot of (submenus are swapped on hover, popups are injected late).
//!
//! Resolution runs in the page as JavaScript. The chain is serialized to
//! JSON and handed to a fixed resolver function, so selector text never
//! becomes script source.
//!
//! Actions (`click`, `hover`, `fill`, `press`) auto-wait for the target to
//! be attached, visible and enabled. `click` and `hover` additionally
//! hit-test the centre of the target: if some other element would receive
//! the pointer there, the action keeps retrying and finally fails with
//! [`BrowserError::ClickIntercepted`].

use crate::error::{BrowserError, Result};
use crate::page::evaluate_in;
use crate::wait::{wait_for_value, WaitConfig, DEFAULT_POLL_INTERVAL};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, MouseButton,
};
use chromiumoxide::page::Page as ChromePage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::trace;

/// Default time an action waits for its target to become actionable.
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// One link in a locator chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Descendants matching a CSS selector.
    Css {
        /// The CSS selector
        selector: String,
    },
    /// The deepest descendants whose text contains `text` (case-insensitive).
    Text {
        /// Text to search for
        text: String,
    },
    /// Descendants with an ARIA role, optionally filtered by accessible name.
    Role {
        /// ARIA role (`button`, `link`, `heading`, ...)
        role: String,
        /// Accessible name to match
        name: Option<String>,
        /// Whether the name must match exactly rather than as a substring
        exact: bool,
    },
    /// Descendants whose `title` attribute contains `text`.
    Title {
        /// Title text to search for
        text: String,
    },
    /// Keeps only the current matches whose text contains `text`.
    HasText {
        /// Text the element must contain
        text: String,
    },
    /// Keeps only the match at `index`.
    Nth {
        /// Zero-based index
        index: usize,
    },
    /// Keeps only the last match.
    Last,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Css { selector } => write!(f, "css={selector:?}"),
            Step::Text { text } => write!(f, "text={text:?}"),
            Step::Role { role, name, exact } => match name {
                Some(name) if *exact => write!(f, "role={role}[name={name:?} exact]"),
                Some(name) => write!(f, "role={role}[name={name:?}]"),
                None => write!(f, "role={role}"),
            },
            Step::Title { text } => write!(f, "title={text:?}"),
            Step::HasText { text } => write!(f, "has-text={text:?}"),
            Step::Nth { index } => write!(f, "nth={index}"),
            Step::Last => write!(f, "last"),
        }
    }
}

/// The serializable part of a locator: which document, which steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Query {
    /// CSS selector of the iframe whose document is searched, if any.
    pub frame: Option<String>,
    /// Steps applied in order, starting from the document.
    pub steps: Vec<Step>,
}

impl Query {
    /// A query with a single step against the top-level document.
    #[must_use]
    pub fn new(step: Step) -> Self {
        Self {
            frame: None,
            steps: vec![step],
        }
    }

    /// A query with a single step against an iframe's document.
    #[must_use]
    pub fn in_frame(frame: impl Into<String>, step: Step) -> Self {
        Self {
            frame: Some(frame.into()),
            steps: vec![step],
        }
    }

    #[must_use]
    fn then(&self, step: Step) -> Self {
        let mut next = self.clone();
        next.steps.push(step);
        next
    }

    /// Wraps `body` into a script that resolves this query first.
    ///
    /// Inside `body`, `__r.els` holds the matched elements, `__r.frameEl` the
    /// iframe (or null), and the helpers from [`HELPERS_JS`] are in scope.
    pub(crate) fn script(&self, body: &str) -> Result<String> {
        let query = serde_json::to_string(self)
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;
        Ok(format!(
            "(() => {{ {HELPERS_JS} const __r = __resolve({query}); {body} }})()"
        ))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(frame) = &self.frame {
            write!(f, "frame={frame:?} >> ")?;
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Resolver and predicates shared by every locator script.
const HELPERS_JS: &str = r#"
const __norm = (s) => (s || '').replace(/\s+/g, ' ').trim().toLowerCase();
const __implicitRoles = {
  button: 'button, input[type=button], input[type=submit], input[type=reset], summary',
  link: 'a[href], area[href]',
  heading: 'h1, h2, h3, h4, h5, h6',
  textbox: 'input:not([type]), input[type=text], input[type=email], input[type=search], input[type=tel], input[type=url], input[type=password], textarea',
  checkbox: 'input[type=checkbox]',
  img: 'img[alt]',
};
const __skipText = new Set(['SCRIPT', 'STYLE', 'NOSCRIPT', 'TEMPLATE']);
const __accName = (el) => __norm(
  el.getAttribute('aria-label') || el.innerText || el.textContent ||
  el.getAttribute('title') || el.value || el.getAttribute('alt'));
const __within = (roots, sel) => {
  const seen = new Set();
  const out = [];
  for (const root of roots) {
    for (const el of root.querySelectorAll(sel)) {
      if (!seen.has(el)) { seen.add(el); out.push(el); }
    }
  }
  return out;
};
const __frameOffset = (frameEl) => {
  if (!frameEl) return { x: 0, y: 0 };
  const rect = frameEl.getBoundingClientRect();
  return { x: rect.left + frameEl.clientLeft, y: rect.top + frameEl.clientTop };
};
const __resolve = (query) => {
  let doc = document;
  let frameEl = null;
  if (query.frame) {
    frameEl = document.querySelector(query.frame);
    let inner = null;
    try { inner = frameEl ? frameEl.contentDocument : null; } catch (e) { inner = null; }
    if (!inner) return { els: [], frameEl };
    doc = inner;
  }
  let els = [doc];
  for (const step of query.steps) {
    switch (step.kind) {
      case 'css':
        els = __within(els, step.selector);
        break;
      case 'text': {
        const t = __norm(step.text);
        const has = (el) => !__skipText.has(el.tagName) && __norm(el.textContent).includes(t);
        els = __within(els, '*').filter((el) => has(el) && ![...el.children].some(has));
        break;
      }
      case 'role': {
        const implicit = __implicitRoles[step.role];
        const sel = `[role="${CSS.escape(step.role)}"]` + (implicit ? `, ${implicit}` : '');
        els = __within(els, sel);
        if (step.name !== null && step.name !== undefined) {
          const want = __norm(step.name);
          els = els.filter((el) => step.exact ? __accName(el) === want : __accName(el).includes(want));
        }
        break;
      }
      case 'title': {
        const want = __norm(step.text);
        els = __within(els, '[title]').filter((el) => __norm(el.getAttribute('title')).includes(want));
        break;
      }
      case 'has_text': {
        const want = __norm(step.text);
        els = els.filter((el) => __norm(el.textContent).includes(want));
        break;
      }
      case 'nth':
        els = els[step.index] ? [els[step.index]] : [];
        break;
      case 'last':
        els = els.length ? [els[els.length - 1]] : [];
        break;
    }
  }
  return { els: els.filter((el) => el !== doc), frameEl };
};
const __visible = (el) => {
  if (!el || !el.isConnected) return false;
  const style = el.ownerDocument.defaultView.getComputedStyle(el);
  if (style.visibility !== 'visible') return false;
  const rect = el.getBoundingClientRect();
  return rect.width > 0 && rect.height > 0;
};
const __enabled = (el) => !el.disabled && el.getAttribute('aria-disabled') !== 'true';
const __describe = (el) => {
  if (!el) return 'nothing';
  let d = '<' + el.tagName.toLowerCase();
  if (el.id) d += ` id="${el.id}"`;
  const cls = typeof el.className === 'string' ? el.className.trim() : '';
  if (cls) d += ` class="${cls.slice(0, 60)}"`;
  return d + '>';
};
"#;

/// Script body checking whether the first match can receive a pointer event.
const ACTIONABILITY_JS: &str = r"
const el = __r.els[0];
if (!el) return { state: 'missing' };
if (!__visible(el)) return { state: 'hidden' };
if (!__enabled(el)) return { state: 'disabled' };
el.scrollIntoView({ block: 'center', inline: 'center' });
const rect = el.getBoundingClientRect();
const cx = rect.left + rect.width / 2;
const cy = rect.top + rect.height / 2;
const off = __frameOffset(__r.frameEl);
const hit = el.ownerDocument.elementFromPoint(cx, cy);
if (!hit) return { state: 'offscreen' };
if (hit !== el && !el.contains(hit)) return { state: 'intercepted', interceptor: __describe(hit) };
if (__r.frameEl) {
  const top = document.elementFromPoint(cx + off.x, cy + off.y);
  if (top !== __r.frameEl) return { state: 'intercepted', interceptor: __describe(top) };
}
return { state: 'ready', x: cx + off.x, y: cy + off.y };
";

/// Outcome of one actionability check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum Actionability {
    Missing,
    Hidden,
    Disabled,
    Offscreen,
    Intercepted { interceptor: String },
    Ready { x: f64, y: f64 },
}

impl Actionability {
    fn label(&self) -> &'static str {
        match self {
            Actionability::Missing => "not attached",
            Actionability::Hidden => "not visible",
            Actionability::Disabled => "not enabled",
            Actionability::Offscreen => "outside the viewport",
            Actionability::Intercepted { .. } => "obscured",
            Actionability::Ready { .. } => "ready",
        }
    }
}

/// A lazily resolved reference to zero or more elements on a page.
#[derive(Clone)]
pub struct Locator {
    page: Arc<ChromePage>,
    query: Query,
    timeout: Duration,
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("query", &self.query.to_string())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.query.fmt(f)
    }
}

impl Locator {
    pub(crate) fn new(page: Arc<ChromePage>, query: Query) -> Self {
        Self {
            page,
            query,
            timeout: DEFAULT_ACTION_TIMEOUT,
        }
    }

    fn then(&self, step: Step) -> Self {
        Self {
            page: self.page.clone(),
            query: self.query.then(step),
            timeout: self.timeout,
        }
    }

    /// The serializable query behind this locator.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Overrides the time actions and text queries wait for the target.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Narrows to descendants matching `selector`.
    #[must_use]
    pub fn locator(&self, selector: &str) -> Self {
        self.then(Step::Css {
            selector: selector.to_string(),
        })
    }

    /// Narrows to descendants with `role` whose accessible name contains `name`.
    #[must_use]
    pub fn get_by_role(&self, role: &str, name: Option<&str>) -> Self {
        self.then(Step::Role {
            role: role.to_string(),
            name: name.map(str::to_string),
            exact: false,
        })
    }

    /// Narrows to the deepest descendants containing `text`.
    #[must_use]
    pub fn get_by_text(&self, text: &str) -> Self {
        self.then(Step::Text {
            text: text.to_string(),
        })
    }

    /// Keeps the current matches that contain `text`.
    #[must_use]
    pub fn filter_has_text(&self, text: &str) -> Self {
        self.then(Step::HasText {
            text: text.to_string(),
        })
    }

    /// Makes a trailing role step match its name exactly.
    #[must_use]
    pub fn exact(mut self) -> Self {
        if let Some(Step::Role { exact, .. }) = self.query.steps.last_mut() {
            *exact = true;
        }
        self
    }

    /// The first match.
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// The last match.
    #[must_use]
    pub fn last(&self) -> Self {
        self.then(Step::Last)
    }

    /// The match at `index` (zero-based).
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        self.then(Step::Nth { index })
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, body: &str) -> Result<T> {
        evaluate_in(&self.page, &self.query.script(body)?).await
    }

    /// Number of elements currently matching. Does not wait.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn count(&self) -> Result<usize> {
        self.eval("return __r.els.length;").await
    }

    /// One locator per current match, in document order. Does not wait.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn all(&self) -> Result<Vec<Locator>> {
        let count = self.count().await?;
        Ok((0..count).map(|i| self.nth(i)).collect())
    }

    /// Whether the first match is visible right now. Missing counts as hidden.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn is_visible(&self) -> Result<bool> {
        self.eval("return __visible(__r.els[0]);").await
    }

    /// Polls [`Locator::is_visible`] for up to `timeout`.
    ///
    /// Returns `false` instead of an error when the element never shows up,
    /// which suits optional popups and overlays.
    pub async fn is_visible_within(&self, timeout: Duration) -> bool {
        wait_for_value(
            || async {
                let visible = self.is_visible().await?;
                Ok(visible.then_some(()))
            },
            WaitConfig::with_timeout(timeout),
            &format!("{self} to be visible"),
        )
        .await
        .is_ok()
    }

    /// Whether the first match exists and is not disabled. Does not wait.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn is_enabled(&self) -> Result<bool> {
        self.eval("const el = __r.els[0]; return !!el && __enabled(el);")
            .await
    }

    async fn wait_attached(&self) -> Result<()> {
        wait_for_value(
            || async {
                let count = self.count().await?;
                Ok((count > 0).then_some(()))
            },
            WaitConfig::with_timeout(self.timeout),
            &format!("{self} to be attached"),
        )
        .await
    }

    /// `textContent` of the first match, waiting for it to be attached.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if nothing matches within the locator timeout.
    pub async fn text_content(&self) -> Result<Option<String>> {
        self.wait_attached().await?;
        self.eval("const el = __r.els[0]; return el ? el.textContent : null;")
            .await
    }

    /// Rendered `innerText` of the first match, waiting for it to be attached.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if nothing matches within the locator timeout.
    pub async fn inner_text(&self) -> Result<String> {
        self.wait_attached().await?;
        let text: Option<String> = self
            .eval("const el = __r.els[0]; return el ? (el.innerText ?? el.textContent) : null;")
            .await?;
        text.ok_or_else(|| BrowserError::ElementNotFound {
            selector: self.to_string(),
        })
    }

    /// Attribute `name` of the first match, waiting for it to be attached.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if nothing matches within the locator timeout.
    pub async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        self.wait_attached().await?;
        let name = serde_json::to_string(name)
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;
        self.eval(&format!(
            "const el = __r.els[0]; return el ? el.getAttribute({name}) : null;"
        ))
        .await
    }

    /// Scrolls the first match into the middle of the viewport if needed.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if nothing matches within the locator timeout.
    pub async fn scroll_into_view(&self) -> Result<()> {
        self.wait_attached().await?;
        let _: bool = self
            .eval(
                "const el = __r.els[0]; \
                 if (el) el.scrollIntoView({ block: 'center', inline: 'center' }); \
                 return !!el;",
            )
            .await?;
        Ok(())
    }

    /// Waits until the first match can receive a pointer event and returns
    /// the viewport coordinates of its centre.
    async fn actionable_point(&self, timeout: Duration) -> Result<(f64, f64)> {
        let start = Instant::now();
        let mut last = Actionability::Missing;

        loop {
            match self.eval::<Actionability>(ACTIONABILITY_JS).await {
                Ok(Actionability::Ready { x, y }) => return Ok((x, y)),
                Ok(state) => {
                    trace!("{self}: {}", state.label());
                    last = state;
                }
                Err(e) => trace!("{self}: actionability check failed: {e}"),
            }

            if start.elapsed() >= timeout {
                return Err(match last {
                    Actionability::Intercepted { interceptor } => BrowserError::ClickIntercepted {
                        target: self.to_string(),
                        interceptor,
                    },
                    other => BrowserError::WaitTimeout {
                        condition: format!("{self} to be actionable (last: {})", other.label()),
                        timeout,
                    },
                });
            }

            sleep(DEFAULT_POLL_INTERVAL).await;
        }
    }

    async fn mouse(&self, kind: DispatchMouseEventType, x: f64, y: f64) -> Result<()> {
        let mut builder = DispatchMouseEventParams::builder().r#type(kind.clone()).x(x).y(y);
        if kind != DispatchMouseEventType::MouseMoved {
            builder = builder.button(MouseButton::Left).click_count(1);
        }
        let params = builder.build().map_err(BrowserError::ScriptExecutionFailed)?;
        self.page.execute(params).await?;
        Ok(())
    }

    /// Clicks the centre of the first match.
    ///
    /// # Errors
    ///
    /// Returns `ClickIntercepted` if another element kept covering the
    /// target until `timeout`, or `WaitTimeout` if the target never became
    /// visible and enabled.
    pub async fn click(&self, timeout: Duration) -> Result<()> {
        let (x, y) = self.actionable_point(timeout).await?;
        self.mouse(DispatchMouseEventType::MouseMoved, x, y).await?;
        self.mouse(DispatchMouseEventType::MousePressed, x, y).await?;
        self.mouse(DispatchMouseEventType::MouseReleased, x, y).await?;
        Ok(())
    }

    /// Moves the mouse over the centre of the first match.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Locator::click`].
    pub async fn hover(&self, timeout: Duration) -> Result<()> {
        let (x, y) = self.actionable_point(timeout).await?;
        self.mouse(DispatchMouseEventType::MouseMoved, x, y).await
    }

    async fn wait_editable(&self, timeout: Duration) -> Result<()> {
        wait_for_value(
            || async {
                let ready: bool = self
                    .eval("const el = __r.els[0]; return __visible(el) && __enabled(el) && !el.readOnly;")
                    .await?;
                Ok(ready.then_some(()))
            },
            WaitConfig::with_timeout(timeout),
            &format!("{self} to be editable"),
        )
        .await
    }

    /// Replaces the value of an input or textarea, firing `input` and `change`.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the field never becomes editable.
    pub async fn fill(&self, value: &str, timeout: Duration) -> Result<()> {
        self.wait_editable(timeout).await?;
        let value = serde_json::to_string(value)
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;
        let filled: bool = self
            .eval(&format!(
                r"const el = __r.els[0];
                if (!el) return false;
                el.focus();
                const desc = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(el), 'value');
                if (desc && desc.set) desc.set.call(el, {value}); else el.value = {value};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;"
            ))
            .await?;

        if filled {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound {
                selector: self.to_string(),
            })
        }
    }

    /// Focuses the first match and presses a key (`Enter`, `Tab`, `Escape`
    /// or a single character).
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the target never becomes editable, or
    /// `ScriptExecutionFailed` for an unsupported key name.
    pub async fn press(&self, key: &str, timeout: Duration) -> Result<()> {
        self.wait_editable(timeout).await?;
        let _: bool = self
            .eval("const el = __r.els[0]; if (el) el.focus(); return !!el;")
            .await?;

        let spec = KeySpec::parse(key)?;
        let mut down = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyDown)
            .key(spec.key.clone())
            .code(spec.code.clone())
            .windows_virtual_key_code(spec.key_code);
        if let Some(text) = &spec.text {
            down = down.text(text.clone());
        }
        let up = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyUp)
            .key(spec.key)
            .code(spec.code)
            .windows_virtual_key_code(spec.key_code);

        self.page
            .execute(down.build().map_err(BrowserError::ScriptExecutionFailed)?)
            .await?;
        self.page
            .execute(up.build().map_err(BrowserError::ScriptExecutionFailed)?)
            .await?;
        Ok(())
    }
}

/// Key description for `Input.dispatchKeyEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeySpec {
    key: String,
    code: String,
    key_code: i64,
    text: Option<String>,
}

impl KeySpec {
    fn parse(key: &str) -> Result<Self> {
        let named = |key: &str, code: i64, text: Option<&str>| Self {
            key: key.to_string(),
            code: key.to_string(),
            key_code: code,
            text: text.map(str::to_string),
        };

        match key {
            "Enter" => Ok(named("Enter", 13, Some("\r"))),
            "Tab" => Ok(named("Tab", 9, None)),
            "Escape" => Ok(named("Escape", 27, None)),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        let upper = c.to_ascii_uppercase();
                        let code = if c.is_ascii_alphabetic() {
                            format!("Key{upper}")
                        } else if c.is_ascii_digit() {
                            format!("Digit{c}")
                        } else {
                            String::new()
                        };
                        Ok(Self {
                            key: c.to_string(),
                            code,
                            key_code: i64::from(u32::from(upper)),
                            text: Some(c.to_string()),
                        })
                    }
                    _ => Err(BrowserError::ScriptExecutionFailed(format!(
                        "unsupported key '{key}'"
                    ))),
                }
            }
        }
    }
}

/// Locators scoped to the document of one iframe.
#[derive(Clone)]
pub struct FrameLocator {
    page: Arc<ChromePage>,
    frame: String,
}

impl fmt::Debug for FrameLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLocator")
            .field("frame", &self.frame)
            .finish()
    }
}

impl FrameLocator {
    pub(crate) fn new(page: Arc<ChromePage>, frame: impl Into<String>) -> Self {
        Self {
            page,
            frame: frame.into(),
        }
    }

    /// Elements matching `selector` inside the frame.
    #[must_use]
    pub fn locator(&self, selector: &str) -> Locator {
        Locator::new(
            self.page.clone(),
            Query::in_frame(
                self.frame.clone(),
                Step::Css {
                    selector: selector.to_string(),
                },
            ),
        )
    }

    /// Elements with `role` inside the frame.
    #[must_use]
    pub fn get_by_role(&self, role: &str, name: Option<&str>) -> Locator {
        Locator::new(
            self.page.clone(),
            Query::in_frame(
                self.frame.clone(),
                Step::Role {
                    role: role.to_string(),
                    name: name.map(str::to_string),
                    exact: false,
                },
            ),
        )
    }
}
