//! The timer registry: one cancellable sleeper task per timer name.
//!
//! 定时器注册表：每个定时器名称对应一个可取消的休眠任务。

use super::command::TimerElapsed;
use crate::intent::{unix_now, TimerIntent};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// One armed timer: the sleeper task's handle, the intent that armed it, and
/// the generation that ties elapsed events back to this arm cycle.
///
/// 一个已武装的定时器：休眠任务的句柄、武装它的意图，以及将到期事件
/// 关联回本次武装周期的generation。
struct ArmedTimer {
    generation: u64,
    intent: TimerIntent,
    handle: JoinHandle<()>,
}

/// The mapping from timer name to its armed sleeper task.
///
/// The registry is owned exclusively by the service actor, so every
/// transition (arm, cancel, fire) is serialized by construction. Sleeper
/// tasks hold no registry state; they only report back over `fire_tx`.
///
/// 从定时器名称到其已武装休眠任务的映射。
///
/// 注册表由服务actor独占拥有，因此每个状态转换（武装、取消、触发）
/// 天然被串行化。休眠任务不持有注册表状态，只通过 `fire_tx` 回报。
pub(crate) struct TimerRegistry {
    timers: HashMap<String, ArmedTimer>,
    next_generation: u64,
    fire_tx: mpsc::Sender<TimerElapsed>,
}

impl TimerRegistry {
    pub(crate) fn new(fire_tx: mpsc::Sender<TimerElapsed>) -> Self {
        Self {
            timers: HashMap::new(),
            next_generation: 0,
            fire_tx,
        }
    }

    /// Arms a timer for `intent.name`, replacing any existing one.
    ///
    /// Replacement is cancel-then-create: at most one pending fire exists per
    /// name at any time. The delay is clamped to zero by
    /// [`TimerIntent::delay_from`], so past trigger times fire immediately.
    ///
    /// 为 `intent.name` 武装一个定时器，替换任何已存在的定时器。
    ///
    /// 替换即先取消再创建：任一时刻每个名称至多有一次待触发。
    /// 延迟由 [`TimerIntent::delay_from`] 钳制到零，因此过去的触发时间会立即触发。
    pub(crate) fn arm(&mut self, intent: TimerIntent) {
        if self.cancel(&intent.name) {
            debug!(name = %intent.name, "Replaced an existing armed timer");
        }

        let generation = self.next_generation;
        self.next_generation += 1;

        let delay = intent.delay_from(unix_now());
        info!(
            name = %intent.name,
            delay_secs = delay.as_secs(),
            generation,
            "Arming timer"
        );

        let name = intent.name.clone();
        let fire_tx = self.fire_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The actor owns the other end; if it is gone the fire is moot.
            // actor拥有另一端；如果它已不在，触发也就无从谈起。
            let _ = fire_tx.send(TimerElapsed { name, generation }).await;
        });

        self.timers.insert(
            intent.name.clone(),
            ArmedTimer {
                generation,
                intent,
                handle,
            },
        );
    }

    /// Cancels the timer for `name`. Returns `false` (a no-op, not an error)
    /// if no timer is armed for that name.
    ///
    /// 取消 `name` 的定时器。如果该名称没有已武装的定时器，返回 `false`
    /// （是无操作，不是错误）。
    pub(crate) fn cancel(&mut self, name: &str) -> bool {
        match self.timers.remove(name) {
            Some(entry) => {
                info!(name = %name, generation = entry.generation, "Cancelling timer");
                entry.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Claims the intent for an elapsed timer, or `None` if the arm cycle the
    /// event belongs to has since been cancelled or replaced.
    ///
    /// The generation check is what suppresses a sleeper that had already
    /// sent its elapsed event before a racing cancel's abort landed. Claiming
    /// removes the entry: fired is terminal for that handle.
    ///
    /// 认领已到期定时器的意图；如果该事件所属的武装周期此后已被取消或替换，
    /// 返回 `None`。
    ///
    /// generation检查正是用来抑制在并发取消的abort生效之前就已发出
    /// 到期事件的休眠任务。认领会移除条目：对该句柄而言触发是终态。
    pub(crate) fn take_fired(&mut self, event: &TimerElapsed) -> Option<TimerIntent> {
        let current = self.timers.get(&event.name)?;
        if current.generation != event.generation {
            debug!(
                name = %event.name,
                stale_generation = event.generation,
                current_generation = current.generation,
                "Ignoring stale elapsed event"
            );
            return None;
        }
        self.timers.remove(&event.name).map(|entry| entry.intent)
    }

    /// Cancels every armed timer. Used for clean shutdown.
    /// 取消每一个已武装的定时器。用于干净地关闭。
    pub(crate) fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        for (name, entry) in self.timers.drain() {
            debug!(name = %name, "Cancelling timer at shutdown");
            entry.handle.abort();
        }
        count
    }

    /// The number of currently armed timers.
    /// 当前已武装的定时器数量。
    pub(crate) fn len(&self) -> usize {
        self.timers.len()
    }
}
