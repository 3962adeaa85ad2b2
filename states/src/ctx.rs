use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, error, warn};
use tokio_util::sync::CancellationToken;

use crate::{
    Command, CommandSnapshot, Compute, ComputeDeps, Dep, State, StateError, StateRuntime,
    StateSyncStatus, TaskHandle, TaskId, Update, Updater,
};

pub(crate) struct ComputeSlot {
    pub(crate) compute: Box<dyn Compute>,
    pub(crate) deps: ComputeDeps,
    pub(crate) status: StateSyncStatus,
}

/// Owner of every state, compute and command of the application.
///
/// The frame loop is:
/// 1. `sync_computes()` applies values published by finished commands.
/// 2. UI reads with `state` / `cached`, writes inputs with `update`, and calls
///    `dispatch` for side effects.
/// 3. `run_computed()` re-derives computes whose inputs changed.
pub struct StateCtx {
    runtime: StateRuntime,

    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, ComputeSlot>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,

    queue: Vec<TypeId>,
    generation: u64,
    root_cancel: CancellationToken,
    latest: BTreeMap<TypeId, TaskHandle>,
    running: Arc<AtomicUsize>,

    #[cfg(not(target_arch = "wasm32"))]
    tasks: tokio::task::JoinSet<()>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.queue.len())
            .field("generation", &self.generation)
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        Self {
            runtime: StateRuntime::new(),
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: Vec::new(),
            generation: 0,
            root_cancel: CancellationToken::new(),
            latest: BTreeMap::new(),
            running: Arc::new(AtomicUsize::new(0)),
            #[cfg(not(target_arch = "wasm32"))]
            tasks: tokio::task::JoinSet::new(),
        }
    }

    // =====================
    // Registration
    // =====================

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let deps = compute.deps();
        self.computes.insert(
            TypeId::of::<T>(),
            ComputeSlot {
                compute: Box::new(compute),
                deps,
                status: StateSyncStatus::Init,
            },
        );
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    // =====================
    // States
    // =====================

    pub fn try_state<T: State>(&self) -> Result<&T, StateError> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(StateError::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|_| panic!("State {} is not registered", type_name::<T>()))
    }

    /// Mutable access. Computes depending on `T` are marked dirty.
    ///
    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.mark_dependents_dirty(id);
        self.states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("State {} is not registered", type_name::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    // =====================
    // Computes
    // =====================

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.compute.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never recorded.
    pub fn compute<T: Compute>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("Compute {} is not registered", type_name::<T>()))
    }

    pub fn compute_status<T: Compute>(&self) -> Result<StateSyncStatus, StateError> {
        self.computes
            .get(&TypeId::of::<T>())
            .map(|slot| slot.status)
            .ok_or_else(StateError::compute_not_found::<T>)
    }

    pub fn updater(&self) -> Updater {
        self.runtime.updater()
    }

    /// Apply every value published since the last call, then spawn queued commands.
    pub fn sync_computes(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        self.reap_tasks();

        for update in self.runtime.drain() {
            let (id, value) = match update {
                Update::Set(id, value) => (id, value),
                Update::Enqueue(id) => {
                    self.queue.push(id);
                    continue;
                }
            };
            if let Some(slot) = self.computes.get_mut(&id) {
                slot.compute.assign_box(value);
                slot.status = StateSyncStatus::Clean;
            } else if let Some(state) = self.states.get_mut(&id) {
                state.assign_box(value);
            } else {
                warn!("Dropping update for unregistered type {id:?}");
                continue;
            }
            self.mark_dependents_dirty(id);
        }

        // Commands requested by other commands see every update applied above.
        self.flush_commands();
    }

    /// Re-run dirty computes until nothing changes.
    pub fn run_computed(&mut self) {
        // Each pass settles at least one level of the dependency chain.
        for _ in 0..=self.computes.len() {
            let dirty: Vec<TypeId> = self
                .computes
                .iter()
                .filter(|(_, slot)| slot.status.needs_run())
                .map(|(id, _)| *id)
                .collect();

            if dirty.is_empty() {
                return;
            }

            for id in &dirty {
                if let Some(slot) = self.computes.get_mut(id) {
                    slot.status = StateSyncStatus::Clean;
                }
            }

            let updater = self.updater();
            for id in &dirty {
                if let Some(slot) = self.computes.get(id) {
                    slot.compute
                        .compute(Dep::new(&self.states, &self.computes), updater.clone());
                }
            }

            self.sync_computes();
        }

        warn!("Computes did not settle, check for a dependency cycle");
    }

    fn mark_dependents_dirty(&mut self, id: TypeId) {
        for slot in self.computes.values_mut() {
            if slot.deps.contains(id) {
                slot.status = StateSyncStatus::Dirty;
            }
        }
    }

    // =====================
    // Commands
    // =====================

    pub fn enqueue_command<T: Command>(&mut self) {
        self.queue.push(TypeId::of::<T>());
    }

    /// Spawn every queued command, each with a fresh snapshot.
    pub fn flush_commands(&mut self) {
        for id in std::mem::take(&mut self.queue) {
            self.spawn_command(id);
        }
    }

    pub fn dispatch<T: Command>(&mut self) {
        if !self.commands.contains_key(&TypeId::of::<T>()) {
            error!("{}", StateError::command_not_found::<T>());
            return;
        }
        self.enqueue_command::<T>();
        self.flush_commands();
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(value) = state.snapshot() {
                snap.insert_state(*id, value);
            }
        }
        for (id, slot) in &self.computes {
            if let Some(value) = slot.compute.snapshot() {
                snap.insert_compute(*id, value);
            }
        }
        snap
    }

    fn spawn_command(&mut self, id: TypeId) {
        let Some(command) = self.commands.get(&id) else {
            warn!("Queued command {id:?} is not registered");
            return;
        };

        self.generation += 1;
        let handle = TaskHandle::new(
            TaskId::new(id, self.generation),
            self.root_cancel.child_token(),
        );

        if command.latest_only() {
            if let Some(previous) = self.latest.insert(id, handle.clone()) {
                debug!("Cancelling superseded task {:?}", previous.id());
                previous.cancel();
            }
        }

        let future = command.run(
            self.snapshot(),
            self.runtime.updater(),
            handle.cancellation_token(),
        );
        let running = RunningGuard::new(&self.running);
        let future = Box::pin(async move {
            future.await;
            drop(running);
        });
        debug!("Spawning task {:?}", handle.id());

        #[cfg(not(target_arch = "wasm32"))]
        self.tasks.spawn(future);

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(future);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn reap_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result
                && err.is_panic()
            {
                error!("Command task panicked: {err}");
            }
        }
    }

    /// Number of spawned tasks not yet joined.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn task_set_mut(&mut self) -> &mut tokio::task::JoinSet<()> {
        &mut self.tasks
    }

    /// Cancel every running command and wait for them to stop.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn shutdown(&mut self) {
        self.root_cancel.cancel();
        self.tasks.shutdown().await;
        self.latest.clear();
        self.sync_computes();
    }

    /// Whether a command is still running or has published something not yet
    /// applied. The UI keeps repainting while this holds.
    pub fn has_pending_work(&self) -> bool {
        self.running.load(Ordering::Acquire) > 0
            || self.runtime.has_pending()
            || !self.queue.is_empty()
    }
}

/// Counts a spawned command as running until its future finishes or is dropped.
struct RunningGuard(Arc<AtomicUsize>);

impl RunningGuard {
    fn new(running: &Arc<AtomicUsize>) -> Self {
        running.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(running))
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::{CommandFuture, assign_impl, state_assign_impl};

    #[derive(Debug, Default, Clone)]
    struct Counter {
        value: i64,
    }

    impl State for Counter {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
            Some(Box::new(self.clone()))
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            state_assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default, Clone)]
    struct Label {
        text: String,
    }

    impl State for Label {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            state_assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default, Clone)]
    struct Doubled {
        value: i64,
        runs: usize,
    }

    impl Compute for Doubled {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn deps(&self) -> ComputeDeps {
            ComputeDeps::new(vec![TypeId::of::<Counter>()], vec![])
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            let counter = deps.get_state_ref::<Counter>();
            updater.set(Self {
                value: counter.value * 2,
                runs: self.runs + 1,
            });
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default, Clone)]
    struct PlusOne {
        value: i64,
    }

    impl Compute for PlusOne {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn deps(&self) -> ComputeDeps {
            ComputeDeps::new(vec![], vec![TypeId::of::<Doubled>()])
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            let doubled = deps.get_compute_ref::<Doubled>();
            updater.set(Self {
                value: doubled.value + 1,
            });
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    /// Writes `Counter.value * 10` into `Label`.
    #[derive(Debug, Default)]
    struct RenderLabelCommand;

    impl Command for RenderLabelCommand {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: Updater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let value = snap.state::<Counter>().value;
            Box::pin(async move {
                updater.set(Label {
                    text: format!("{}", value * 10),
                });
            })
        }
    }

    /// Sets `Counter` to 7, then asks for a label render.
    #[derive(Debug, Default)]
    struct ChainCommand;

    impl Command for ChainCommand {
        fn run(
            &self,
            _snap: CommandSnapshot,
            updater: Updater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            Box::pin(async move {
                updater.set(Counter { value: 7 });
                updater.enqueue::<RenderLabelCommand>();
            })
        }
    }

    #[derive(Debug, Default)]
    struct SlowCommand {
        completed: Arc<AtomicUsize>,
        cancelled: Arc<AtomicUsize>,
    }

    impl Command for SlowCommand {
        fn run(
            &self,
            _snap: CommandSnapshot,
            _updater: Updater,
            cancel: CancellationToken,
        ) -> CommandFuture {
            let completed = Arc::clone(&self.completed);
            let cancelled = Arc::clone(&self.cancelled);
            Box::pin(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        cancelled.fetch_add(1, Ordering::SeqCst);
                    }
                    _ = tokio::time::sleep(Duration::from_millis(50)) => {
                        completed.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        }

        fn latest_only(&self) -> bool {
            true
        }
    }

    fn ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter::default());
        ctx.add_state(Label::default());
        ctx.record_compute(Doubled::default());
        ctx.record_compute(PlusOne::default());
        ctx.record_command(RenderLabelCommand);
        ctx.record_command(ChainCommand);
        ctx
    }

    async fn wait_all(ctx: &mut StateCtx) {
        while ctx.task_set_mut().join_next().await.is_some() {}
        ctx.sync_computes();
    }

    #[test]
    fn missing_state_is_an_error() {
        let ctx = StateCtx::new();
        assert_eq!(
            ctx.try_state::<Counter>().unwrap_err(),
            StateError::state_not_found::<Counter>()
        );
        assert!(ctx.cached::<Doubled>().is_none());
    }

    #[test]
    fn computes_run_on_first_pass() {
        let mut ctx = ctx();
        assert_eq!(ctx.compute_status::<Doubled>().unwrap(), StateSyncStatus::Init);

        ctx.run_computed();

        assert_eq!(ctx.compute::<Doubled>().runs, 1);
        assert_eq!(ctx.compute::<PlusOne>().value, 1);
        assert_eq!(ctx.compute_status::<Doubled>().unwrap(), StateSyncStatus::Clean);
    }

    #[test]
    fn update_reruns_dependents_transitively() {
        let mut ctx = ctx();
        ctx.run_computed();

        ctx.update::<Counter>(|c| c.value = 21);
        assert_eq!(ctx.compute_status::<Doubled>().unwrap(), StateSyncStatus::Dirty);
        ctx.run_computed();

        assert_eq!(ctx.compute::<Doubled>().value, 42);
        assert_eq!(ctx.compute::<PlusOne>().value, 43);
    }

    #[test]
    fn unrelated_update_does_not_rerun() {
        let mut ctx = ctx();
        ctx.run_computed();

        ctx.update::<Label>(|l| l.text = "unrelated".to_owned());
        ctx.run_computed();

        assert_eq!(ctx.compute::<Doubled>().runs, 1);
    }

    #[test]
    fn updater_values_wait_for_sync() {
        let mut ctx = ctx();
        ctx.updater().set(Counter { value: 3 });
        assert_eq!(ctx.state::<Counter>().value, 0);

        ctx.sync_computes();
        assert_eq!(ctx.state::<Counter>().value, 3);
        assert_eq!(ctx.compute_status::<Doubled>().unwrap(), StateSyncStatus::Dirty);
    }

    #[tokio::test]
    async fn command_sees_snapshot_and_publishes_on_sync() {
        let mut ctx = ctx();
        ctx.update::<Counter>(|c| c.value = 4);
        ctx.dispatch::<RenderLabelCommand>();
        // Changing the state after dispatch must not affect the running command.
        ctx.update::<Counter>(|c| c.value = 9);

        while ctx.task_set_mut().join_next().await.is_some() {}
        assert_eq!(ctx.state::<Label>().text, "");

        ctx.sync_computes();
        assert_eq!(ctx.state::<Label>().text, "40");
        assert_eq!(ctx.task_count(), 0);
    }

    #[tokio::test]
    async fn enqueue_runs_only_on_flush() {
        let mut ctx = ctx();
        ctx.enqueue_command::<RenderLabelCommand>();
        assert_eq!(ctx.task_count(), 0);

        ctx.flush_commands();
        assert_eq!(ctx.task_count(), 1);
        wait_all(&mut ctx).await;
        assert_eq!(ctx.state::<Label>().text, "0");
    }

    #[tokio::test]
    async fn dispatching_unregistered_command_is_ignored() {
        let mut ctx = StateCtx::new();
        ctx.dispatch::<RenderLabelCommand>();
        assert_eq!(ctx.task_count(), 0);
    }

    #[tokio::test]
    async fn latest_only_cancels_previous_run() {
        let completed = Arc::new(AtomicUsize::new(0));
        let cancelled = Arc::new(AtomicUsize::new(0));
        let mut ctx = StateCtx::new();
        ctx.record_command(SlowCommand {
            completed: Arc::clone(&completed),
            cancelled: Arc::clone(&cancelled),
        });

        ctx.dispatch::<SlowCommand>();
        ctx.dispatch::<SlowCommand>();
        wait_all(&mut ctx).await;

        assert_eq!(completed.load(Ordering::SeqCst), 1);
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn shutdown_cancels_running_tasks() {
        let completed = Arc::new(AtomicUsize::new(0));
        let cancelled = Arc::new(AtomicUsize::new(0));
        let mut ctx = StateCtx::new();
        ctx.record_command(SlowCommand {
            completed: Arc::clone(&completed),
            cancelled: Arc::clone(&cancelled),
        });

        ctx.dispatch::<SlowCommand>();
        ctx.shutdown().await;

        assert_eq!(ctx.task_count(), 0);
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enqueued_command_runs_after_sync_with_fresh_snapshot() {
        let mut ctx = ctx();
        ctx.dispatch::<ChainCommand>();

        while ctx.task_set_mut().join_next().await.is_some() {}
        assert_eq!(ctx.task_count(), 0);

        // Applies `Counter` first, then spawns the render against it.
        ctx.sync_computes();
        assert_eq!(ctx.state::<Counter>().value, 7);
        assert_eq!(ctx.task_count(), 1);

        wait_all(&mut ctx).await;
        assert_eq!(ctx.state::<Label>().text, "70");
    }

    #[tokio::test]
    async fn enqueued_latest_only_command_cancels_running_one() {
        let completed = Arc::new(AtomicUsize::new(0));
        let cancelled = Arc::new(AtomicUsize::new(0));
        let mut ctx = StateCtx::new();
        ctx.record_command(SlowCommand {
            completed: Arc::clone(&completed),
            cancelled: Arc::clone(&cancelled),
        });

        ctx.dispatch::<SlowCommand>();
        ctx.updater().enqueue::<SlowCommand>();
        ctx.sync_computes();
        wait_all(&mut ctx).await;

        assert_eq!(completed.load(Ordering::SeqCst), 1);
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pending_work_covers_running_and_unsynced() {
        let mut ctx = ctx();
        assert!(!ctx.has_pending_work());

        ctx.dispatch::<RenderLabelCommand>();
        assert!(ctx.has_pending_work());

        while ctx.task_set_mut().join_next().await.is_some() {}
        // Finished, but its update is not applied yet.
        assert!(ctx.has_pending_work());

        ctx.sync_computes();
        assert!(!ctx.has_pending_work());
    }
}
