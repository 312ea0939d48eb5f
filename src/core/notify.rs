//! 容器变更通知：每个容器自己持有一份订阅表，按注册顺序同步派发

/// 订阅句柄，退订时使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback<E> = Box<dyn FnMut(&E) + Send + Sync + 'static>;

/// 多播通知表。变更提交后才派发；失败的操作不派发。
/// 回调内禁止再去改动同一个容器（没有重入保护）。
pub struct Notifier<E> {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Callback<E>)>,
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<E> Notifier<E> {
    /// 注册回调，返回退订用的句柄
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + Send + Sync + 'static) -> SubscriberId {
        self.next_id += 1;
        let id = SubscriberId(self.next_id);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// 退订；句柄不存在时返回 false
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// 按注册顺序把事件发给所有订阅者
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
