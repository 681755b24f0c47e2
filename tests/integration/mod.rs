//! End-to-end controller scenarios against a scripted store
