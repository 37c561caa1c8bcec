use std::sync::atomic::{AtomicU32, Ordering};

pub const DEFAULT_INITIAL_CREDITS: u32 = 50;

/// 付費 API 的 credit 計數，整個 process 內所有批次共用
///
/// credit 不會回補；唯一的修改是 `try_consume` 的原子「大於零才減一」，
/// 因此可放在 `Arc` 後供多個批次同時使用。
#[derive(Debug)]
pub struct CreditLedger {
    initial: u32,
    remaining: AtomicU32,
}

impl CreditLedger {
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            remaining: AtomicU32::new(initial),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::Acquire)
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    /// 扣一點 credit；已為零時回傳 `false` 且不動計數
    pub fn try_consume(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                current.checked_sub(1)
            })
            .is_ok()
    }

    pub fn consumed(&self) -> u32 {
        self.initial - self.remaining()
    }
}

impl Default for CreditLedger {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CREDITS)
    }
}
