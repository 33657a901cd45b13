//! # Proof Lifecycle Classification
//!
//! A registry keeps one [`ProofRecord`] per entity, overwritten on each
//! accepted submission. Display surfaces need a coarse status for it:
//!
//! ```text
//!              is_valid && proof_timestamp > 0
//! NeverProven ────────────────────────────────▶ Active
//!                                                 │ expiry - now < window
//!                                                 ▼
//!                                              Expiring
//!                                                 │ expiry < now
//!                                                 ▼
//!                                              Expired
//! ```
//!
//! There is no stored transition history. [`ProofRecord::status`] is a pure
//! function of the record, the clock, and one [`ExpiryPolicy`]; every
//! caller shares the same warning window.

use serde::{Deserialize, Serialize};

use zkr_core::{
    EntityId, FieldElement, PublicInputs, ReserveBand, StructuralInputError, Timestamp,
};

/// Width of the "expiring soon" window: 72 hours.
pub const EXPIRY_WARNING_WINDOW_SECS: u64 = 72 * 3600;

pub const SECS_PER_DAY: u64 = 86_400;

/// Number of fields in the registry's positional proof record.
pub const PROOF_RECORD_FIELDS: usize = 8;

// ─── Status ──────────────────────────────────────────────────────────

/// Lifecycle status of an entity's latest proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofStatus {
    /// No valid proof has ever been recorded.
    NeverProven,
    /// Valid, and expiry is outside the warning window.
    Active,
    /// Valid, but expiry falls inside the warning window.
    Expiring,
    /// Expiry has passed.
    Expired,
}

impl ProofStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NeverProven => "never_proven",
            Self::Active => "active",
            Self::Expiring => "expiring",
            Self::Expired => "expired",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NeverProven => "Never proven",
            Self::Active => "Active",
            Self::Expiring => "Expiring soon",
            Self::Expired => "Expired",
        }
    }

    /// Whether the entity currently holds a usable proof.
    pub fn has_valid_proof(&self) -> bool {
        matches!(self, Self::Active | Self::Expiring)
    }
}

impl std::fmt::Display for ProofStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The expiry warning window used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPolicy {
    pub warning_window_secs: u64,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            warning_window_secs: EXPIRY_WARNING_WINDOW_SECS,
        }
    }
}

impl ExpiryPolicy {
    /// Classify raw `(is_valid, proof_timestamp, expiry_timestamp)` at `now`.
    pub fn classify(
        &self,
        is_valid: bool,
        proof_timestamp: u64,
        expiry_timestamp: u64,
        now: u64,
    ) -> ProofStatus {
        if !is_valid || proof_timestamp == 0 {
            ProofStatus::NeverProven
        } else if expiry_timestamp < now {
            ProofStatus::Expired
        } else if expiry_timestamp - now < self.warning_window_secs {
            ProofStatus::Expiring
        } else {
            ProofStatus::Active
        }
    }
}

// ─── Record ──────────────────────────────────────────────────────────

/// One entity's latest proof as stored by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    pub entity_id: EntityId,
    pub block_height: u64,
    pub liability_root: FieldElement,
    pub band: ReserveBand,
    pub proof_timestamp: u64,
    pub is_valid: bool,
    pub expiry_timestamp: u64,
    pub submission_count: u64,
}

impl ProofRecord {
    /// An empty record for an entity that has never submitted.
    pub fn never_proven(entity_id: EntityId) -> Self {
        Self {
            entity_id,
            block_height: 0,
            liability_root: FieldElement::ZERO,
            band: ReserveBand::Insolvent,
            proof_timestamp: 0,
            is_valid: false,
            expiry_timestamp: 0,
            submission_count: 0,
        }
    }

    /// Decode the registry's positional response:
    ///
    /// ```text
    /// [entity_id, block_height, liability_root, band,
    ///  proof_timestamp, is_valid, expiry_timestamp, submission_count]
    /// ```
    ///
    /// Every field is a hex integer. `is_valid` is true when non-zero.
    pub fn from_positional<S: AsRef<str>>(fields: &[S]) -> Result<Self, StructuralInputError> {
        if fields.len() != PROOF_RECORD_FIELDS {
            return Err(StructuralInputError::FieldCount {
                expected: PROOF_RECORD_FIELDS,
                actual: fields.len(),
            });
        }
        let felt = |i: usize, name: &str| FieldElement::parse_hex(name, fields[i].as_ref());
        let int = |i: usize, name: &str| -> Result<u64, StructuralInputError> {
            let value = felt(i, name)?;
            value.to_u64().ok_or_else(|| StructuralInputError::InvalidInteger {
                field: name.to_string(),
                value: value.to_hex(),
            })
        };

        Ok(Self {
            entity_id: EntityId(felt(0, "entity_id")?),
            block_height: int(1, "block_height")?,
            liability_root: felt(2, "liability_root")?,
            band: ReserveBand::try_from(int(3, "band")?)?,
            proof_timestamp: int(4, "proof_timestamp")?,
            is_valid: !felt(5, "is_valid")?.is_zero(),
            expiry_timestamp: int(6, "expiry_timestamp")?,
            submission_count: int(7, "submission_count")?,
        })
    }

    /// Encode back into the positional hex layout.
    pub fn to_positional(&self) -> [String; PROOF_RECORD_FIELDS] {
        [
            self.entity_id.0.to_hex(),
            FieldElement::from_u64(self.block_height).to_hex(),
            self.liability_root.to_hex(),
            FieldElement::from_u64(u64::from(self.band.as_u8())).to_hex(),
            FieldElement::from_u64(self.proof_timestamp).to_hex(),
            FieldElement::from_u64(u64::from(self.is_valid)).to_hex(),
            FieldElement::from_u64(self.expiry_timestamp).to_hex(),
            FieldElement::from_u64(self.submission_count).to_hex(),
        ]
    }

    /// The public inputs this record attests to.
    pub fn public_inputs(&self) -> PublicInputs {
        PublicInputs {
            entity_id: self.entity_id,
            block_height: self.block_height,
            liability_root: self.liability_root,
            band: self.band,
            proof_timestamp: self.proof_timestamp,
        }
    }

    /// Status at `now` under `policy`.
    pub fn status(&self, now: Timestamp, policy: &ExpiryPolicy) -> ProofStatus {
        policy.classify(
            self.is_valid,
            self.proof_timestamp,
            self.expiry_timestamp,
            now.unix_secs(),
        )
    }

    /// Whole days left before expiry, floored, never negative.
    pub fn days_until_expiry(&self, now: Timestamp) -> u64 {
        self.expiry_timestamp.saturating_sub(now.unix_secs()) / SECS_PER_DAY
    }

    /// Whole hours left before expiry, floored, never negative.
    pub fn hours_until_expiry(&self, now: Timestamp) -> u64 {
        self.expiry_timestamp.saturating_sub(now.unix_secs()) / 3600
    }
}

// ─── Ecosystem health ────────────────────────────────────────────────

/// Status counts across every registered entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EcosystemHealth {
    pub total: usize,
    pub active: usize,
    pub expiring: usize,
    pub expired: usize,
    pub never_proven: usize,
    /// Most recent proof timestamp among entities with a valid proof.
    pub latest_proof_timestamp: Option<u64>,
    /// Earliest expiry among entities with a valid proof.
    pub next_expiry_timestamp: Option<u64>,
}

impl EcosystemHealth {
    /// Summarize `records` at `now`.
    pub fn from_records<'a, I>(records: I, now: Timestamp, policy: &ExpiryPolicy) -> Self
    where
        I: IntoIterator<Item = &'a ProofRecord>,
    {
        let mut health = Self::default();
        for record in records {
            let status = record.status(now, policy);
            health.total += 1;
            match status {
                ProofStatus::Active => health.active += 1,
                ProofStatus::Expiring => health.expiring += 1,
                ProofStatus::Expired => health.expired += 1,
                ProofStatus::NeverProven => health.never_proven += 1,
            }
            if status.has_valid_proof() {
                health.latest_proof_timestamp = health
                    .latest_proof_timestamp
                    .max(Some(record.proof_timestamp));
                health.next_expiry_timestamp = Some(
                    health
                        .next_expiry_timestamp
                        .map_or(record.expiry_timestamp, |t| t.min(record.expiry_timestamp)),
                );
            }
        }
        health
    }

    /// Entities holding a valid (active or expiring) proof.
    pub fn valid(&self) -> usize {
        self.active + self.expiring
    }

    /// Share of entities with a valid proof, rounded to the nearest percent.
    pub fn valid_percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.valid() * 200 + self.total) / (self.total * 2);
        u8::try_from(pct).unwrap_or(100)
    }
}
