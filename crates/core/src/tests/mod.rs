//! Shared test harnesses for store backends
