pub mod annotation;
pub mod label;
pub mod sequence;
pub mod span;

pub use annotation::{Annotation, Association, Confidence, IndicoDocument};
pub use label::{Label, LabelSet};
pub use sequence::{CandidateAssociation, LabeledDocument, PredictedDocument, SequenceLabel};
pub use span::ResolvedSpan;
