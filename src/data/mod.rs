/// Data layer: extraction, loading, filtering and reporting.
///
/// Architecture:
/// ```text
///  <name>_atomic.json / <name>_coupled.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  open file / scan dir → LoadedModel
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ConfigExtractor│  model name, parameters, include_sets
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   body    │  state, ports, transitions, components, couplings
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep models of one kind
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  report   │  JSON / CSV / text
///   └──────────┘
/// ```

pub mod batch;
pub mod body;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod loader;
pub mod model;
pub mod report;
