//! Row predicates for each requirement type.
//!
//! Each helper treats an absent constraint as satisfied and a missing cell
//! as failing an active constraint.

use super::RowFilter;
use crate::catalog::{CoolerRow, CpuRow, MemoryRow, MotherboardRow, StorageRow};
use crate::enumeration::{normalize, split_atoms};
use crate::requirements::{
    CoolerRequirements, CpuRequirements, MemoryRequirements, MotherboardRequirements,
    StorageRequirements,
};

pub(crate) fn at_least<T: PartialOrd>(bound: Option<T>, cell: Option<T>) -> bool {
    match bound {
        None => true,
        Some(bound) => cell.is_some_and(|value| value >= bound),
    }
}

pub(crate) fn at_most<T: PartialOrd>(bound: Option<T>, cell: Option<T>) -> bool {
    match bound {
        None => true,
        Some(bound) => cell.is_some_and(|value| value <= bound),
    }
}

/// Single-valued categorical column. An empty list does not restrict.
pub(crate) fn one_of(allowed: Option<&[String]>, cell: Option<&str>) -> bool {
    match allowed {
        None | Some([]) => true,
        Some(allowed) => cell.is_some_and(|value| allowed.contains(&normalize(value))),
    }
}

/// Delimited column: any atom in the allowed set is a match.
pub(crate) fn any_atom_of(allowed: Option<&[String]>, cell: Option<&str>) -> bool {
    match allowed {
        None | Some([]) => true,
        Some(allowed) => cell.is_some_and(|value| {
            split_atoms(value).any(|atom| allowed.contains(&normalize(atom)))
        }),
    }
}

/// `Some(true)` requires the cell to be present; `Some(false)` and `None` pass.
pub(crate) fn present_if(required: Option<bool>, cell: Option<&str>) -> bool {
    match required {
        Some(true) => cell.is_some(),
        _ => true,
    }
}

impl RowFilter for CpuRequirements {
    type Row = CpuRow;

    fn matches(&self, row: &CpuRow) -> bool {
        at_least(self.min_cores, row.core_count)
            && at_least(self.min_core_clock_ghz, row.performance_core_clock)
            && at_least(self.min_boost_clock_ghz, row.performance_core_boost_clock)
            && one_of(self.microarchitecture.as_deref(), row.microarchitecture.as_deref())
            && at_most(self.max_tdp_watts, row.tdp)
            && present_if(self.needs_integrated_graphics, row.integrated_graphics.as_deref())
            && at_least(self.min_rating, row.rating)
            && at_most(self.max_price, row.price)
    }
}

impl RowFilter for CoolerRequirements {
    type Row = CoolerRow;

    fn matches(&self, row: &CoolerRow) -> bool {
        at_least(self.min_fan_rpm, row.average_fan_rpm)
            && at_most(self.max_noise_level_db, row.average_noise_level)
            && at_most(self.max_radiator_size_mm, row.radiator_size)
            && any_atom_of(self.preferred_color.as_deref(), row.color.as_deref())
            && at_least(self.min_rating, row.rating)
            && at_most(self.max_price, row.price)
    }
}

impl RowFilter for StorageRequirements {
    type Row = StorageRow;

    fn matches(&self, row: &StorageRow) -> bool {
        at_least(self.min_capacity_gb, row.capacity_gb)
            && one_of(self.preferred_type.as_deref(), row.drive_type.as_deref())
            && at_least(self.min_cache_gb, row.cache_gb)
            && one_of(self.preferred_form_factor.as_deref(), row.form_factor.as_deref())
            && one_of(self.preferred_interface.as_deref(), row.interface.as_deref())
            && at_least(self.min_rating, row.rating)
            && at_most(self.max_price_per_gb, row.price_per_gb)
    }
}

impl RowFilter for MemoryRequirements {
    type Row = MemoryRow;

    fn matches(&self, row: &MemoryRow) -> bool {
        at_least(self.min_capacity_gb, row.total_ram)
            && at_least(self.min_speed_mhz, row.speed_mhz())
            && at_most(self.max_module_count, row.module_count)
            && at_most(self.max_cas_latency, row.cas_latency)
            && any_atom_of(self.preferred_color.as_deref(), row.color.as_deref())
            && at_least(self.min_rating, row.rating)
            && at_most(self.max_price, row.price)
    }
}

impl RowFilter for MotherboardRequirements {
    type Row = MotherboardRow;

    fn matches(&self, row: &MotherboardRow) -> bool {
        one_of(self.preferred_socket.as_deref(), row.cpu_socket.as_deref())
            && one_of(self.preferred_form_factor.as_deref(), row.form_factor.as_deref())
            && at_least(self.min_max_memory_gb, row.max_memory_gb)
            && at_least(self.min_memory_slots, row.memory_slots)
            && any_atom_of(self.preferred_color.as_deref(), row.color.as_deref())
            && at_least(self.min_rating, row.rating)
            && at_most(self.max_price, row.price)
    }
}
