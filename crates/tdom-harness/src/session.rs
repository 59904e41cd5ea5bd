#![forbid(unsafe_code)]

//! Memoizing render sessions.
//!
//! A [`Session`] forces resolved [`VNode`] trees into [`DomNode`] trees, one
//! pass at a time. Memo nodes are cached by their position in the tree:
//!
//! - a positional child is addressed by its index
//! - a keyed child is addressed by its key, so reordering keeps the cache
//! - the output of a memo thunk is addressed by a dedicated segment
//!
//! When the memo at a position carries the same key as in the previous pass,
//! the previous output is reused and the thunk is not called. Each cache
//! entry owns the entries of the memos nested in its output, addressed
//! relative to it, so a hit carries them over in one move. When the outer
//! key changes, its nested entries are offered to the rerun thunk. Positions
//! not visited in a pass are dropped.
//!
//! Outputs are cached before any `map` tagger runs. Taggers wrapping a memo
//! are applied on every pass, so reused output dispatches through the
//! current taggers.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use ahash::AHashMap;
use serde_json::Value;
use tdom_render::{Handled, Handler, MemoKey, Thunk};

use crate::config::{HarnessConfig, MarkupConfig};
use crate::dom::{DomNode, VNode};
use crate::error::HarnessError;
use crate::golden::compute_markup_checksum;
use crate::markup::to_markup;
use crate::snapshot::NodeSnapshot;

/// One step of a path from the root to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Positional child.
    Index(usize),
    /// Keyed child.
    Key(String),
    /// Output of a memo thunk.
    Forced,
}

/// Display adapter printing a path as `/0/#row-3/~`.
struct SlotPath<'a>(&'a [Slot]);

impl fmt::Display for SlotPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for slot in self.0 {
            match slot {
                Slot::Index(i) => write!(f, "/{i}")?,
                Slot::Key(k) => write!(f, "/#{k}")?,
                Slot::Forced => f.write_str("/~")?,
            }
        }
        Ok(())
    }
}

/// Counters for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Nodes built in this pass. Nodes inside reused memo output are not counted.
    pub nodes: usize,
    /// Memo nodes whose previous output was reused.
    pub memo_hits: usize,
    /// Memo nodes whose thunk was called.
    pub memo_misses: usize,
    /// Whether any subtree was cut off at the depth limit.
    pub depth_exceeded: bool,
}

/// Why a memo thunk had to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissReason {
    Disabled,
    NotCached,
    KeyChanged,
}

/// Memo entries of one scope, by path relative to the scope.
type Cache = AHashMap<Vec<Slot>, MemoEntry>;

struct MemoEntry {
    /// Holds the key's pins, so no address in it is reused while cached.
    key: MemoKey,
    /// Unmapped output, a `DomNode<M>` for the memo's own message type.
    output: Rc<dyn Any>,
    nested: Cache,
}

fn count_entries(cache: &Cache) -> usize {
    cache
        .values()
        .map(|entry| 1 + count_entries(&entry.nested))
        .sum()
}

/// Stateful renderer front end.
///
/// Keeps the memo cache between passes. One session corresponds to one
/// mounted view.
pub struct Session<Msg> {
    config: HarnessConfig,
    cache: Cache,
    passes: u64,
    last_stats: RenderStats,
    _msg: PhantomData<fn(Msg)>,
}

impl<Msg> Default for Session<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Msg> Session<Msg> {
    /// Session with the default configuration.
    pub fn new() -> Self {
        Self {
            config: HarnessConfig::default(),
            cache: Cache::new(),
            passes: 0,
            last_stats: RenderStats::default(),
            _msg: PhantomData,
        }
    }

    /// Session with a validated configuration.
    pub fn with_config(config: HarnessConfig) -> Result<Self, HarnessError> {
        Ok(Self {
            config: config.validated()?,
            ..Self::new()
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Number of completed passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Counters of the most recent pass.
    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }

    /// Number of memo outputs currently cached, nested ones included.
    pub fn cached_entries(&self) -> usize {
        count_entries(&self.cache)
    }

    /// Drop every cached memo output. The next pass rebuilds everything.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<Msg: 'static> Session<Msg> {
    /// Force `root`, reusing memo output from the previous pass where keys match.
    pub fn render(&mut self, root: VNode<Msg>) -> Rendered<Msg> {
        let _span = tracing::debug_span!("render_pass", pass = self.passes).entered();

        let mut pass = Pass {
            memoize: self.config.memoize,
            max_depth: self.config.max_depth,
            previous: std::mem::take(&mut self.cache),
            next: Cache::new(),
            path: Vec::new(),
            base: 0,
            stats: RenderStats::default(),
        };
        let root = pass.force(root, 0);
        let stats = pass.stats;
        self.cache = pass.next;
        self.passes += 1;
        self.last_stats = stats;

        tracing::debug!(
            nodes = stats.nodes,
            memo_hits = stats.memo_hits,
            memo_misses = stats.memo_misses,
            cached = count_entries(&self.cache),
            "render pass complete"
        );

        Rendered {
            root,
            stats,
            markup: self.config.markup.clone(),
        }
    }
}

impl<Msg> fmt::Debug for Session<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("cached", &count_entries(&self.cache))
            .field("passes", &self.passes)
            .finish()
    }
}

/// State of one pass.
///
/// `previous` and `next` belong to the innermost memo scope being forced;
/// `base` is where that scope starts in `path`.
pub(crate) struct Pass {
    memoize: bool,
    max_depth: usize,
    previous: Cache,
    next: Cache,
    path: Vec<Slot>,
    base: usize,
    stats: RenderStats,
}

impl Pass {
    pub(crate) fn force<Msg: 'static>(&mut self, node: VNode<Msg>, depth: usize) -> DomNode<Msg> {
        if depth > self.max_depth {
            if !self.stats.depth_exceeded {
                tracing::warn!(
                    max_depth = self.max_depth,
                    path = %SlotPath(&self.path),
                    "tree exceeds depth limit, subtree dropped"
                );
            }
            self.stats.depth_exceeded = true;
            return DomNode::Text(String::new());
        }

        match node {
            VNode::Element {
                tag,
                attrs,
                children,
            } => {
                self.stats.nodes += 1;
                let children = children
                    .into_iter()
                    .enumerate()
                    .map(|(i, child)| self.descend(Slot::Index(i), child, depth))
                    .collect();
                DomNode::Element {
                    tag,
                    attrs,
                    children,
                }
            }
            VNode::Keyed {
                tag,
                attrs,
                children,
            } => {
                self.stats.nodes += 1;
                let children = children
                    .into_iter()
                    .map(|(key, child)| {
                        let forced = self.descend(Slot::Key(key.clone()), child, depth);
                        (key, forced)
                    })
                    .collect();
                DomNode::Keyed {
                    tag,
                    attrs,
                    children,
                }
            }
            VNode::Text(s) => {
                self.stats.nodes += 1;
                DomNode::Text(s)
            }
            VNode::Memo { key, thunk } => self.force_memo(key, thunk, depth),
            VNode::Mapped(mapped) => mapped.force(self, depth),
        }
    }

    fn descend<Msg: 'static>(
        &mut self,
        slot: Slot,
        node: VNode<Msg>,
        depth: usize,
    ) -> DomNode<Msg> {
        self.path.push(slot);
        let out = self.force(node, depth + 1);
        self.path.pop();
        out
    }

    fn force_memo<Msg: 'static>(
        &mut self,
        key: MemoKey,
        thunk: Thunk<VNode<Msg>>,
        depth: usize,
    ) -> DomNode<Msg> {
        let local = self.path[self.base..].to_vec();
        let (reason, nested) = if !self.memoize {
            (MissReason::Disabled, Cache::new())
        } else {
            match self.previous.remove(&local) {
                Some(entry) if entry.key == key => {
                    if let Some(output) = entry.output.downcast_ref::<DomNode<Msg>>() {
                        let output = output.clone();
                        self.stats.memo_hits += 1;
                        tracing::debug!(path = %SlotPath(&self.path), "memo hit, reusing output");
                        self.next.insert(local, entry);
                        return output;
                    }
                    (MissReason::KeyChanged, entry.nested)
                }
                Some(entry) => (MissReason::KeyChanged, entry.nested),
                None => (MissReason::NotCached, Cache::new()),
            }
        };

        self.stats.memo_misses += 1;
        tracing::debug!(
            path = %SlotPath(&self.path),
            reason = ?reason,
            "memo miss, running thunk"
        );

        self.path.push(Slot::Forced);
        let base = std::mem::replace(&mut self.base, self.path.len());
        let previous = std::mem::replace(&mut self.previous, nested);
        let next = std::mem::take(&mut self.next);

        let output = self.force(thunk(), depth + 1);

        let nested = std::mem::replace(&mut self.next, next);
        self.previous = previous;
        self.base = base;
        self.path.pop();

        if self.memoize {
            self.next.insert(
                local,
                MemoEntry {
                    key,
                    output: Rc::new(output.clone()),
                    nested,
                },
            );
        }
        output
    }
}

// ---------------------------------------------------------------------------
// Pass output
// ---------------------------------------------------------------------------

/// Output of one render pass.
pub struct Rendered<Msg> {
    root: DomNode<Msg>,
    stats: RenderStats,
    markup: MarkupConfig,
}

impl<Msg> Rendered<Msg> {
    /// Forced root node.
    pub fn root(&self) -> &DomNode<Msg> {
        &self.root
    }

    /// Take the forced root node.
    pub fn into_root(self) -> DomNode<Msg> {
        self.root
    }

    /// Counters of the pass that produced this output.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// HTML using the session's markup settings.
    pub fn to_markup(&self) -> String {
        to_markup(&self.root, &self.markup)
    }

    /// HTML using explicit markup settings.
    pub fn to_markup_with(&self, config: &MarkupConfig) -> String {
        to_markup(&self.root, config)
    }

    /// Serializable structural snapshot.
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot::from_node(&self.root)
    }

    /// BLAKE3 checksum of the compact markup, prefixed with `blake3:`.
    pub fn checksum(&self) -> String {
        compute_markup_checksum(&to_markup(&self.root, &MarkupConfig::default()))
    }

    /// Concatenated text in document order.
    pub fn text_content(&self) -> String {
        self.root.text_content()
    }

    /// Handlers listening for `event`, in document order.
    pub fn handlers(&self, event: &str) -> Vec<&Handler<Msg>> {
        self.root.handlers(event)
    }

    /// Run every `event` handler against `payload`.
    ///
    /// Handlers whose decoder fails produce nothing.
    pub fn dispatch(&self, event: &str, payload: &Value) -> Vec<Handled<Msg>> {
        self.handlers(event)
            .into_iter()
            .filter_map(|handler| match handler.decode(payload) {
                Ok(handled) => Some(handled),
                Err(err) => {
                    tracing::debug!(event, error = %err, "handler decode failed, skipped");
                    None
                }
            })
            .collect()
    }
}

impl<Msg> fmt::Debug for Rendered<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendered")
            .field("root", &self.root)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::VirtualDom;
    use std::cell::Cell;
    use std::rc::Rc;
    use tdom_render::{Attr, MemoToken, Renderer, Tagger};

    fn counted_memo(key: u64, calls: &Rc<Cell<u32>>, label: &str) -> VNode<()> {
        let calls = Rc::clone(calls);
        let label = label.to_string();
        VirtualDom::memo(
            MemoKey::new().with(MemoToken::Value(key)),
            Rc::new(move || {
                calls.set(calls.get() + 1);
                VirtualDom::text_node(label.clone())
            }),
        )
    }

    fn wrap(children: Vec<VNode<()>>) -> VNode<()> {
        VirtualDom::element_node("div", vec![], children)
    }

    #[test]
    fn same_key_reuses_output() {
        let calls = Rc::new(Cell::new(0));
        let mut session = Session::new();
        let first = session.render(wrap(vec![counted_memo(1, &calls, "a")]));
        let second = session.render(wrap(vec![counted_memo(1, &calls, "b")]));
        assert_eq!(calls.get(), 1);
        // Reused output, even though the new thunk would say "b".
        assert_eq!(first.text_content(), "a");
        assert_eq!(second.text_content(), "a");
        assert_eq!(second.stats().memo_hits, 1);
        assert_eq!(second.stats().memo_misses, 0);
    }

    #[test]
    fn changed_key_reruns_thunk() {
        let calls = Rc::new(Cell::new(0));
        let mut session = Session::new();
        session.render(wrap(vec![counted_memo(1, &calls, "a")]));
        let second = session.render(wrap(vec![counted_memo(2, &calls, "b")]));
        assert_eq!(calls.get(), 2);
        assert_eq!(second.text_content(), "b");
        assert_eq!(second.stats().memo_misses, 1);
    }

    #[test]
    fn position_is_part_of_identity() {
        let calls = Rc::new(Cell::new(0));
        let mut session = Session::new();
        session.render(wrap(vec![counted_memo(1, &calls, "a")]));
        session.render(wrap(vec![
            VirtualDom::text_node("pad"),
            counted_memo(1, &calls, "a"),
        ]));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn keyed_children_keep_cache_when_reordered() {
        let calls = Rc::new(Cell::new(0));
        let list = |order: &[(&str, u64)]| -> VNode<()> {
            VirtualDom::keyed_element(
                "ul".into(),
                vec![],
                order
                    .iter()
                    .map(|(k, id)| (k.to_string(), counted_memo(*id, &calls, k)))
                    .collect(),
            )
        };
        let mut session = Session::new();
        session.render(list(&[("a", 1), ("b", 2)]));
        let second = session.render(list(&[("b", 2), ("a", 1)]));
        assert_eq!(calls.get(), 2);
        assert_eq!(second.text_content(), "ba");
        assert_eq!(second.stats().memo_hits, 2);
    }

    #[test]
    fn memoize_disabled_always_runs() {
        let calls = Rc::new(Cell::new(0));
        let config = HarnessConfig {
            memoize: false,
            ..HarnessConfig::default()
        };
        let mut session = Session::with_config(config).unwrap();
        session.render(counted_memo(1, &calls, "a"));
        session.render(counted_memo(1, &calls, "a"));
        assert_eq!(calls.get(), 2);
        assert_eq!(session.cached_entries(), 0);
    }

    #[test]
    fn unvisited_entries_are_dropped() {
        let calls = Rc::new(Cell::new(0));
        let mut session = Session::new();
        session.render(wrap(vec![counted_memo(1, &calls, "a")]));
        assert_eq!(session.cached_entries(), 1);
        session.render(wrap(vec![]));
        assert_eq!(session.cached_entries(), 0);
        session.render(wrap(vec![counted_memo(1, &calls, "a")]));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn nested_entries_survive_outer_hit() {
        let inner_calls = Rc::new(Cell::new(0));
        let outer_calls = Rc::new(Cell::new(0));
        let outer = |key: u64| -> VNode<()> {
            let inner_calls = Rc::clone(&inner_calls);
            let outer_calls = Rc::clone(&outer_calls);
            VirtualDom::memo(
                MemoKey::new().with(MemoToken::Value(key)),
                Rc::new(move || {
                    outer_calls.set(outer_calls.get() + 1);
                    wrap(vec![counted_memo(7, &inner_calls, "inner")])
                }),
            )
        };
        let mut session = Session::new();
        session.render(outer(1));
        session.render(outer(1));
        assert_eq!(session.cached_entries(), 2);
        session.render(outer(2));
        assert_eq!(outer_calls.get(), 2);
        assert_eq!(inner_calls.get(), 1);
    }

    #[test]
    fn mapped_hit_applies_current_tagger() {
        let calls = Rc::new(Cell::new(0));
        let view = |slot: u8| -> VNode<(u8, u8)> {
            let calls = Rc::clone(&calls);
            let button = VirtualDom::memo(
                MemoKey::new().with(MemoToken::Value(5)),
                Rc::new(move || {
                    calls.set(calls.get() + 1);
                    VirtualDom::element_node(
                        "button",
                        vec![Attr::event("click", Handler::message(5u8))],
                        vec![],
                    )
                }),
            );
            let tagger: Tagger<u8, (u8, u8)> = Rc::new(move |m| (slot, m));
            VirtualDom::map(tagger, VirtualDom::element_node("div", vec![], vec![button]))
        };
        let mut session = Session::new();
        session.render(view(1));
        let second = session.render(view(2));
        assert_eq!(calls.get(), 1);
        assert_eq!(second.stats().memo_hits, 1);
        let sent: Vec<_> = second
            .dispatch("click", &Value::Null)
            .into_iter()
            .map(|h| h.message)
            .collect();
        assert_eq!(sent, vec![(2, 5)]);
    }

    #[test]
    fn sibling_hits_keep_their_own_entries() {
        let calls = Rc::new(Cell::new(0));
        let row = |keys: &[u64]| {
            wrap(
                keys.iter()
                    .map(|&k| counted_memo(k, &calls, &k.to_string()))
                    .collect(),
            )
        };
        let mut session = Session::new();
        session.render(row(&[1, 2, 3]));
        let second = session.render(row(&[1, 2, 4]));
        assert_eq!(calls.get(), 4);
        assert_eq!(second.stats().memo_hits, 2);
        assert_eq!(second.text_content(), "124");
        assert_eq!(session.cached_entries(), 3);
    }

    #[test]
    fn clear_forgets_everything() {
        let calls = Rc::new(Cell::new(0));
        let mut session = Session::new();
        session.render(counted_memo(1, &calls, "a"));
        session.clear();
        session.render(counted_memo(1, &calls, "a"));
        assert_eq!(calls.get(), 2);
        assert_eq!(session.passes(), 2);
    }

    #[test]
    fn depth_limit_cuts_and_flags() {
        let config = HarnessConfig {
            max_depth: 2,
            ..HarnessConfig::default()
        };
        let mut session = Session::with_config(config).unwrap();
        let deep = wrap(vec![wrap(vec![wrap(vec![VirtualDom::text_node("deep")])])]);
        let rendered = session.render(deep);
        assert!(rendered.stats().depth_exceeded);
        assert_eq!(rendered.text_content(), "");
        assert_eq!(rendered.to_markup(), "<div><div><div></div></div></div>");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = HarnessConfig {
            max_depth: 0,
            ..HarnessConfig::default()
        };
        assert!(matches!(
            Session::<()>::with_config(config),
            Err(HarnessError::Validation(_))
        ));
    }

    #[test]
    fn stats_count_built_nodes() {
        let mut session = Session::new();
        let rendered = session.render(wrap(vec![
            VirtualDom::text_node("a"),
            VirtualDom::text_node("b"),
        ]));
        assert_eq!(rendered.stats().nodes, 3);
        assert_eq!(session.last_stats(), rendered.stats());
    }

    #[test]
    fn checksum_ignores_pretty_setting() {
        let tree = || wrap(vec![VirtualDom::text_node("x")]);
        let compact = Session::new().render(tree());
        let config = HarnessConfig {
            markup: MarkupConfig::pretty(),
            ..HarnessConfig::default()
        };
        let pretty = Session::with_config(config).unwrap().render(tree());
        assert_ne!(compact.to_markup(), pretty.to_markup());
        assert_eq!(compact.checksum(), pretty.checksum());
        assert!(compact.checksum().starts_with("blake3:"));
    }

    #[test]
    fn dispatch_skips_failed_decoders() {
        let node: VNode<i64> = VirtualDom::element_node(
            "div",
            vec![
                Attr::event(
                    "key",
                    Handler::normal(|e: &Value| {
                        e.get("n")
                            .and_then(Value::as_i64)
                            .ok_or_else(|| tdom_render::DecodeError::MissingField("/n".into()))
                    }),
                ),
                Attr::event("key", Handler::message(0)),
            ],
            vec![],
        );
        let rendered = Session::new().render(node);
        let handled = rendered.dispatch("key", &serde_json::json!({}));
        assert_eq!(handled.len(), 1);
        assert_eq!(handled[0].message, 0);
        let handled = rendered.dispatch("key", &serde_json::json!({"n": 4}));
        assert_eq!(
            handled.iter().map(|h| h.message).collect::<Vec<_>>(),
            vec![4, 0]
        );
    }

    #[test]
    fn slot_path_display() {
        let path = [Slot::Index(0), Slot::Key("row-3".into()), Slot::Forced];
        assert_eq!(SlotPath(&path).to_string(), "/0/#row-3/~");
        assert_eq!(SlotPath(&[]).to_string(), "/");
    }
}
