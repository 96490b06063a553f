use crate::{HandleId, Table, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

/// The animation port. A rendering engine (or the bundled [`Tweens`]
/// driver) moves one handle's transform toward a target over a duration
/// and reports completion by tween id.
///
/// Starting a tween on a handle supersedes any tween already running on
/// that same handle; re-entrant triggers can never stack overlapping
/// tweens on one object.
pub trait Animator {
    fn tween(&mut self, handle: HandleId, from: Transform, to: Transform, duration: f32)
        -> TweenId;

    fn cancel(&mut self, handle: HandleId);
}

#[derive(Debug, Clone)]
struct ActiveTween {
    id: TweenId,
    handle: HandleId,
    from: Transform,
    to: Transform,
    duration: f32,
    elapsed: f32,
}

/// Frame-stepped linear tween driver. Each `tick` advances every active
/// tween, writes the interpolated transform into the table, and returns
/// the ids that finished this frame, in start order.
#[derive(Debug, Default)]
pub struct Tweens {
    active: Vec<ActiveTween>,
    next_id: u64,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    pub fn tick(&mut self, dt: f32, table: &mut Table) -> Vec<TweenId> {
        let mut done = Vec::new();
        let mut i = 0;
        while i < self.active.len() {
            let tween = &mut self.active[i];
            tween.elapsed += dt;
            let finished = tween.elapsed >= tween.duration;
            let id = tween.id;
            let target = tween.handle;
            let value = if finished {
                tween.to
            } else {
                tween.from.lerp(tween.to, tween.elapsed / tween.duration)
            };
            match table.get_mut(target) {
                Some(handle) => handle.transform = value,
                // Handle despawned mid-flight: drop the tween silently.
                None => {
                    self.active.remove(i);
                    continue;
                }
            }
            if finished {
                done.push(id);
                self.active.remove(i);
            } else {
                i += 1;
            }
        }
        done
    }

    /// Jump every active tween straight to its target. Returns the
    /// finished ids in start order.
    pub fn finish_all(&mut self, table: &mut Table) -> Vec<TweenId> {
        let mut done = Vec::new();
        for tween in self.active.drain(..) {
            if let Some(handle) = table.get_mut(tween.handle) {
                handle.transform = tween.to;
            }
            done.push(tween.id);
        }
        done
    }
}

impl Animator for Tweens {
    fn tween(
        &mut self,
        handle: HandleId,
        from: Transform,
        to: Transform,
        duration: f32,
    ) -> TweenId {
        self.cancel(handle);
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.active.push(ActiveTween {
            id,
            handle,
            from,
            to,
            duration,
            elapsed: 0.0,
        });
        id
    }

    fn cancel(&mut self, handle: HandleId) {
        self.active.retain(|tween| tween.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Face, Vec2};

    #[test]
    fn tick_interpolates_and_completes() {
        let mut table = Table::default();
        let id = table.spawn(1, Face::Down, Transform::default());
        let mut tweens = Tweens::new();
        let to = Transform::at(Vec2::new(100.0, 0.0));
        let tween = tweens.tween(id, Transform::default(), to, 1.0);

        assert!(tweens.tick(0.5, &mut table).is_empty());
        let halfway = table.get(id).expect("live").transform.pos.x;
        assert!((halfway - 50.0).abs() < 1e-3);

        let done = tweens.tick(0.5, &mut table);
        assert_eq!(done, vec![tween]);
        assert_eq!(table.get(id).expect("live").transform, to);
        assert!(tweens.is_idle());
    }

    #[test]
    fn new_tween_supersedes_running_one() {
        let mut table = Table::default();
        let id = table.spawn(1, Face::Down, Transform::default());
        let mut tweens = Tweens::new();
        let first = tweens.tween(id, Transform::default(), Transform::at(Vec2::new(10.0, 0.0)), 1.0);
        let second = tweens.tween(id, Transform::default(), Transform::at(Vec2::new(0.0, 9.0)), 0.1);

        let done = tweens.tick(1.0, &mut table);
        assert_eq!(done, vec![second]);
        assert_ne!(first, second);
        let pos = table.get(id).expect("live").transform.pos;
        assert_eq!(pos, Vec2::new(0.0, 9.0));
    }

    #[test]
    fn despawned_handles_drop_their_tweens() {
        let mut table = Table::default();
        let id = table.spawn(1, Face::Down, Transform::default());
        let mut tweens = Tweens::new();
        tweens.tween(id, Transform::default(), Transform::at(Vec2::new(5.0, 5.0)), 1.0);
        table.despawn(id);
        assert!(tweens.tick(2.0, &mut table).is_empty());
        assert!(tweens.is_idle());
    }
}
