//! Timed BFS animation on a tokio task.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::{AbortHandle, JoinHandle};

use super::render::{Frame, FramePhase, Renderer};
use super::scheduler::{Scheduler, TokioScheduler};
use super::traversal::{Expansion, Step, Traversal, TraversalSnapshot};
use crate::error::AnimationError;
use crate::models::GraphModel;

/// Pauses between the two phases of every traversal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    /// Time a dequeued node stays highlighted before it is committed.
    pub processing_delay: Duration,
    /// Time the expanded queue is shown before the next dequeue.
    pub advance_delay: Duration,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(1500),
            advance_delay: Duration::from_millis(2000),
        }
    }
}

/// Generation counter guarding renders.
///
/// A task only renders while holding the lock and only if its generation is
/// still current; cancellation bumps the generation under the same lock.
type RenderGate = Arc<Mutex<u64>>;

struct ActiveRun {
    abort: AbortHandle,
    renderer: Arc<dyn Renderer>,
}

/// Runs one BFS animation at a time.
///
/// Starting a new animation cancels the previous one. Must be used from
/// within a tokio runtime.
pub struct BfsAnimator<S: Scheduler = TokioScheduler> {
    scheduler: Arc<S>,
    timings: AnimationTimings,
    expansion: Expansion,
    root: usize,
    gate: RenderGate,
    active: Option<ActiveRun>,
}

impl BfsAnimator<TokioScheduler> {
    /// Animator on real tokio timers.
    pub fn new(timings: AnimationTimings, expansion: Expansion) -> Self {
        Self::with_scheduler(TokioScheduler, timings, expansion)
    }
}

impl<S: Scheduler> BfsAnimator<S> {
    pub fn with_scheduler(scheduler: S, timings: AnimationTimings, expansion: Expansion) -> Self {
        Self {
            scheduler: Arc::new(scheduler),
            timings,
            expansion,
            root: 0,
            gate: Arc::new(Mutex::new(0)),
            active: None,
        }
    }

    /// Start traversal from `root` instead of node 0.
    pub fn with_root(mut self, root: usize) -> Self {
        self.root = root;
        self
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// Whether an animation is still running.
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|run| !run.abort.is_finished())
    }

    /// Start animating a traversal of `graph`, cancelling any running one.
    ///
    /// The root must index into `graph.nodes`; an out-of-range root produces
    /// a meaningless animation rather than an error.
    pub fn start(&mut self, graph: Arc<GraphModel>, renderer: Arc<dyn Renderer>) -> Animation {
        self.cancel();

        let generation = {
            let mut current = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
            *current += 1;
            *current
        };

        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edges.len(),
            root = self.root,
            expansion = ?self.expansion,
            "starting BFS traversal"
        );

        let run = Run {
            graph,
            renderer: Arc::clone(&renderer),
            scheduler: Arc::clone(&self.scheduler),
            timings: self.timings,
            traversal: Traversal::new(self.root, self.expansion),
            gate: Arc::clone(&self.gate),
            generation,
        };
        let task = tokio::spawn(run.drive());

        self.active = Some(ActiveRun {
            abort: task.abort_handle(),
            renderer,
        });

        Animation { task }
    }

    /// Cancel the running animation and clear what it rendered.
    ///
    /// No frame is rendered by the cancelled run once this returns.
    pub fn cancel(&mut self) {
        let Some(run) = self.active.take() else {
            return;
        };

        {
            let mut current = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
            *current += 1;
        }
        run.abort.abort();
        run.renderer.clear();
        tracing::debug!("traversal cancelled");
    }
}

impl<S: Scheduler> Drop for BfsAnimator<S> {
    fn drop(&mut self) {
        if let Some(run) = self.active.take() {
            *self.gate.lock().unwrap_or_else(PoisonError::into_inner) += 1;
            run.abort.abort();
        }
    }
}

/// Handle to a started animation.
pub struct Animation {
    task: JoinHandle<Option<Vec<usize>>>,
}

impl Animation {
    /// Wait for the traversal to finish and return its final path.
    pub async fn finished(self) -> Result<Vec<usize>, AnimationError> {
        match self.task.await {
            Ok(Some(path)) => Ok(path),
            Ok(None) => Err(AnimationError::Cancelled),
            Err(e) if e.is_cancelled() => Err(AnimationError::Cancelled),
            Err(e) => Err(AnimationError::Aborted(e.to_string())),
        }
    }
}

/// State moved into the animation task.
struct Run<S> {
    graph: Arc<GraphModel>,
    renderer: Arc<dyn Renderer>,
    scheduler: Arc<S>,
    timings: AnimationTimings,
    traversal: Traversal,
    gate: RenderGate,
    generation: u64,
}

impl<S: Scheduler> Run<S> {
    /// Returns the final path, or `None` if superseded.
    async fn drive(mut self) -> Option<Vec<usize>> {
        let start = TraversalSnapshot {
            queue: vec![self.traversal.root()],
            ..Default::default()
        };
        self.render(&start, FramePhase::Started)?;

        while let Some(step) = self.traversal.step(&self.graph) {
            match step {
                Step::Processing(snapshot) => {
                    tracing::debug!(node = ?snapshot.processing, queue = ?snapshot.queue, "processing");
                    self.render(&snapshot, FramePhase::Processing)?;
                    self.scheduler.delay(self.timings.processing_delay).await;
                }
                Step::Expanded(snapshot) => {
                    tracing::debug!(processed = ?snapshot.processed, queue = ?snapshot.queue, "expanded");
                    self.render(&snapshot, FramePhase::Expanded)?;
                    self.scheduler.delay(self.timings.advance_delay).await;
                }
                Step::Completed(path) => {
                    self.gated(|| self.renderer.highlight_path(&self.graph, &path))?;
                    tracing::info!(visited = path.len(), "completed traversal");
                    return Some(path);
                }
            }
        }

        None
    }

    fn render(&self, snapshot: &TraversalSnapshot, phase: FramePhase) -> Option<()> {
        self.gated(|| {
            self.renderer.render(&Frame {
                graph: &self.graph,
                snapshot,
                phase,
            })
        })
    }

    /// Run `f` only if this run has not been superseded.
    fn gated(&self, f: impl FnOnce()) -> Option<()> {
        let current = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != self.generation {
            return None;
        }
        f();
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ImmediateScheduler;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Frame(FramePhase, TraversalSnapshot),
        Path(Vec<usize>),
        Clear,
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Event>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Renderer for Recorder {
        fn render(&self, frame: &Frame<'_>) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Frame(frame.phase, frame.snapshot.clone()));
        }

        fn highlight_path(&self, _graph: &GraphModel, path: &[usize]) {
            self.events.lock().unwrap().push(Event::Path(path.to_vec()));
        }

        fn clear(&self) {
            self.events.lock().unwrap().push(Event::Clear);
        }
    }

    fn graph(nodes: &str, edges: &str) -> Arc<GraphModel> {
        Arc::new(GraphModel::parse(nodes, edges).unwrap())
    }

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_to_completion() {
        let recorder = Arc::new(Recorder::default());
        let mut animator = BfsAnimator::new(AnimationTimings::default(), Expansion::OriginOnly);

        let animation = animator.start(graph("A,B,C,D", "0-1;0-2;1-3;0-3;1-2"), recorder.clone());
        let path = animation.finished().await.unwrap();

        assert_eq!(path, vec![0, 1, 2, 3]);
        let events = recorder.events();
        // Started + (processing, expanded) per node + final path
        assert_eq!(events.len(), 1 + 4 * 2 + 1);
        assert!(matches!(&events[0], Event::Frame(FramePhase::Started, s) if s.queue == vec![0]));
        assert_eq!(events.last(), Some(&Event::Path(vec![0, 1, 2, 3])));
        assert!(!animator.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_between_phases() {
        let recorder = Arc::new(Recorder::default());
        let mut animator = BfsAnimator::new(AnimationTimings::default(), Expansion::OriginOnly);
        let _animation = animator.start(graph("A,B", "0-1"), recorder.clone());

        tokio::time::sleep(millis(1)).await;
        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], Event::Frame(FramePhase::Processing, s) if s.processing == Some(0)));

        // Processing delay elapses: node committed and B queued
        tokio::time::sleep(millis(1500)).await;
        let events = recorder.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[2], Event::Frame(FramePhase::Expanded, s) if s.queue == vec![1]));

        // Advance delay elapses: B dequeued
        tokio::time::sleep(millis(2000)).await;
        assert_eq!(recorder.events().len(), 4);
        assert!(animator.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_all_rendering() {
        let recorder = Arc::new(Recorder::default());
        let mut animator = BfsAnimator::new(AnimationTimings::default(), Expansion::OriginOnly);
        let animation = animator.start(graph("A,B,C", "0-1;1-2"), recorder.clone());

        tokio::time::sleep(millis(1)).await;
        animator.cancel();
        let after_cancel = recorder.events();
        assert_eq!(after_cancel.last(), Some(&Event::Clear));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(recorder.events(), after_cancel);
        assert!(matches!(
            animation.finished().await,
            Err(AnimationError::Cancelled)
        ));
        assert!(!animator.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_previous_run() {
        let recorder = Arc::new(Recorder::default());
        let mut animator = BfsAnimator::new(AnimationTimings::default(), Expansion::OriginOnly);

        let first = animator.start(graph("A,B,C", "0-1;1-2"), recorder.clone());
        tokio::time::sleep(millis(1)).await;
        let second = animator.start(graph("E,F,G,H", "0-1;1-2;2-3;0-2"), recorder.clone());

        assert!(matches!(first.finished().await, Err(AnimationError::Cancelled)));
        assert_eq!(second.finished().await.unwrap(), vec![0, 1, 2, 3]);

        let events = recorder.events();
        let clear_at = events.iter().position(|e| *e == Event::Clear).unwrap();
        // Exactly one clear, and every frame after it belongs to the second run
        assert_eq!(events.iter().filter(|e| **e == Event::Clear).count(), 1);
        assert_eq!(events.len() - clear_at - 1, 1 + 4 * 2 + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_closes_render_gate() {
        let recorder = Arc::new(Recorder::default());
        let mut animator = BfsAnimator::new(AnimationTimings::default(), Expansion::OriginOnly);
        let animation = animator.start(graph("A,B,C", "0-1;1-2"), recorder.clone());

        tokio::time::sleep(millis(1)).await;
        let gate = Arc::clone(&animator.gate);
        let generation = *gate.lock().unwrap();
        drop(animator);
        assert_eq!(*gate.lock().unwrap(), generation + 1);

        let after_drop = recorder.events();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(recorder.events(), after_drop);
        assert!(matches!(
            animation.finished().await,
            Err(AnimationError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_immediate_scheduler_and_custom_root() {
        let recorder = Arc::new(Recorder::default());
        let mut animator = BfsAnimator::with_scheduler(
            ImmediateScheduler,
            AnimationTimings::default(),
            Expansion::Undirected,
        )
        .with_root(2);

        let animation = animator.start(graph("A,B,C", "0-1;1-2"), recorder.clone());
        assert_eq!(animation.finished().await.unwrap(), vec![2, 1, 0]);
    }
}
