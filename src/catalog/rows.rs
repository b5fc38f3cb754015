//! Typed catalog rows, one struct per component category.

use super::{cell, CatalogRow, Category};
use serde::{Deserialize, Serialize};

/// CPU catalog row (`cpu.csv`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuRow {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(deserialize_with = "cell::count")]
    pub core_count: Option<u32>,
    #[serde(deserialize_with = "cell::number")]
    pub performance_core_clock: Option<f64>,
    #[serde(deserialize_with = "cell::number")]
    pub performance_core_boost_clock: Option<f64>,
    #[serde(deserialize_with = "cell::text")]
    pub microarchitecture: Option<String>,
    #[serde(deserialize_with = "cell::number")]
    pub tdp: Option<f64>,
    #[serde(default, deserialize_with = "cell::text")]
    pub integrated_graphics: Option<String>,
    #[serde(default, deserialize_with = "cell::number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "cell::number")]
    pub price: Option<f64>,
}

impl CatalogRow for CpuRow {
    const CATEGORY: Category = Category::Cpu;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "name",
        "core_count",
        "performance_core_clock",
        "performance_core_boost_clock",
        "microarchitecture",
        "tdp",
        "price",
    ];

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "microarchitecture" => self.microarchitecture.as_deref(),
            "integrated_graphics" => self.integrated_graphics.as_deref(),
            _ => None,
        }
    }
}

/// CPU cooler catalog row (`cooler.csv`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolerRow {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(deserialize_with = "cell::number")]
    pub average_fan_rpm: Option<f64>,
    #[serde(deserialize_with = "cell::number")]
    pub average_noise_level: Option<f64>,
    #[serde(default, deserialize_with = "cell::text")]
    pub color: Option<String>,
    #[serde(deserialize_with = "cell::number")]
    pub radiator_size: Option<f64>,
    #[serde(default, deserialize_with = "cell::number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "cell::number")]
    pub price: Option<f64>,
}

impl CatalogRow for CoolerRow {
    const CATEGORY: Category = Category::Cooler;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "name",
        "average_fan_rpm",
        "average_noise_level",
        "radiator_size",
        "price",
    ];

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "color" => self.color.as_deref(),
            _ => None,
        }
    }
}

/// Internal storage catalog row (`storage.csv`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageRow {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(deserialize_with = "cell::number")]
    pub capacity_gb: Option<f64>,
    #[serde(deserialize_with = "cell::number")]
    pub price_per_gb: Option<f64>,
    #[serde(rename = "type", deserialize_with = "cell::text")]
    pub drive_type: Option<String>,
    #[serde(deserialize_with = "cell::number")]
    pub cache_gb: Option<f64>,
    #[serde(deserialize_with = "cell::text")]
    pub form_factor: Option<String>,
    #[serde(deserialize_with = "cell::text")]
    pub interface: Option<String>,
    #[serde(default, deserialize_with = "cell::number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "cell::number")]
    pub price: Option<f64>,
}

impl CatalogRow for StorageRow {
    const CATEGORY: Category = Category::Storage;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "name",
        "capacity_gb",
        "price_per_gb",
        "type",
        "cache_gb",
        "form_factor",
        "interface",
        "price",
    ];

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "type" => self.drive_type.as_deref(),
            "form_factor" => self.form_factor.as_deref(),
            "interface" => self.interface.as_deref(),
            _ => None,
        }
    }
}

/// Memory kit catalog row (`memory.csv`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRow {
    #[serde(alias = "title")]
    pub name: String,
    /// Module speed as listed, e.g. `DDR5-6000`.
    #[serde(deserialize_with = "cell::text")]
    pub speed: Option<String>,
    #[serde(deserialize_with = "cell::count")]
    pub module_count: Option<u32>,
    #[serde(deserialize_with = "cell::number")]
    pub total_ram: Option<f64>,
    #[serde(default, deserialize_with = "cell::number")]
    pub price_per_gb: Option<f64>,
    #[serde(default, deserialize_with = "cell::text")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "cell::number")]
    pub first_word_latency: Option<f64>,
    #[serde(deserialize_with = "cell::number")]
    pub cas_latency: Option<f64>,
    #[serde(default, deserialize_with = "cell::number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "cell::number")]
    pub price: Option<f64>,
}

impl MemoryRow {
    /// Effective speed in MHz, taken from the number after the generation
    /// prefix (`DDR5-6000` -> 6000). Plain numbers are accepted as-is.
    pub fn speed_mhz(&self) -> Option<f64> {
        let speed = self.speed.as_deref()?;
        let tail = speed.rsplit('-').next().unwrap_or(speed);
        cell::parse_number(tail).ok().flatten()
    }
}

impl CatalogRow for MemoryRow {
    const CATEGORY: Category = Category::Memory;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "name",
        "speed",
        "module_count",
        "total_ram",
        "cas_latency",
        "price",
    ];

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "speed" => self.speed.as_deref(),
            "color" => self.color.as_deref(),
            _ => None,
        }
    }
}

/// Motherboard catalog row (`motherboard.csv`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotherboardRow {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(deserialize_with = "cell::text")]
    pub cpu_socket: Option<String>,
    #[serde(deserialize_with = "cell::text")]
    pub form_factor: Option<String>,
    #[serde(deserialize_with = "cell::number")]
    pub max_memory_gb: Option<f64>,
    #[serde(deserialize_with = "cell::count")]
    pub memory_slots: Option<u32>,
    #[serde(default, deserialize_with = "cell::text")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "cell::number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "cell::number")]
    pub price: Option<f64>,
}

impl CatalogRow for MotherboardRow {
    const CATEGORY: Category = Category::Motherboard;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "name",
        "cpu_socket",
        "form_factor",
        "max_memory_gb",
        "memory_slots",
        "price",
    ];

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Option<f64> {
        self.price
    }

    fn text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "cpu_socket" => self.cpu_socket.as_deref(),
            "form_factor" => self.form_factor.as_deref(),
            "color" => self.color.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_with_speed(speed: Option<&str>) -> MemoryRow {
        MemoryRow {
            name: "Kit".to_string(),
            speed: speed.map(str::to_string),
            module_count: Some(2),
            total_ram: Some(32.0),
            price_per_gb: None,
            color: None,
            first_word_latency: None,
            cas_latency: Some(30.0),
            rating: None,
            price: Some(99.0),
        }
    }

    #[test]
    fn test_memory_speed_from_generation_prefix() {
        assert_eq!(memory_with_speed(Some("DDR5-6000")).speed_mhz(), Some(6000.0));
        assert_eq!(memory_with_speed(Some("DDR4-3200")).speed_mhz(), Some(3200.0));
    }

    #[test]
    fn test_memory_speed_plain_or_missing() {
        assert_eq!(memory_with_speed(Some("3600")).speed_mhz(), Some(3600.0));
        assert_eq!(memory_with_speed(None).speed_mhz(), None);
        assert_eq!(memory_with_speed(Some("DDR5")).speed_mhz(), None);
    }

    #[test]
    fn test_storage_type_column_lookup() {
        let row = StorageRow {
            name: "Drive".to_string(),
            capacity_gb: Some(1000.0),
            price_per_gb: Some(0.08),
            drive_type: Some("SSD".to_string()),
            cache_gb: None,
            form_factor: Some("M.2-2280".to_string()),
            interface: Some("M.2 PCIe 4.0 X4".to_string()),
            rating: None,
            price: Some(80.0),
        };
        assert_eq!(row.text("type"), Some("SSD"));
        assert_eq!(row.text("form_factor"), Some("M.2-2280"));
        assert_eq!(row.text("unknown"), None);
    }
}
