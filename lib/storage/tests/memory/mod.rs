mod containers;

use ldp_fusion_storage::memory::MemResourceStore;

fn create_store() -> MemResourceStore {
    MemResourceStore::new()
}
