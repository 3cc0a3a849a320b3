use super::narrative;
use super::normalize::normalize;
use super::quality::{apply_main_stat_policy, roll_quality, to_score, WeightedQuality};
use super::types::{
    ArchetypeBlock, BuildEvaluation, OverallBlock, Recommendation, ResolvedMainStat,
    ScoringResult, StatDetail,
};
use super::Scorer;
use crate::model::{Archetype, Core, Talent};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

/// Runs normalization, roll inference and quality aggregation for one
/// (archetype, talent) pair.
pub fn evaluate_build(
    scorer: &Scorer,
    archetype: Archetype,
    talent: Talent,
    core: &Core,
) -> BuildEvaluation {
    let weights = scorer.reference.build_weights(archetype, talent);
    let mut aggregate = WeightedQuality::default();
    let mut details = Vec::with_capacity(core.sub_stats.len());

    for sub in &core.sub_stats {
        let weight = weights.sub_stat_weight(&sub.key);

        let Some(range) = scorer.reference.stat_range(&sub.key) else {
            debug!("No value range for '{}', scoring it as zero", sub.key);
            details.push(StatDetail {
                key: sub.key.clone(),
                weight,
                quality: 0,
                upgrade_count: sub.upgrade_count,
                total_rolls: sub.total_rolls(),
                scored: false,
            });
            continue;
        };

        let value = normalize(&sub.value, &sub.key);
        let quality = roll_quality(value, sub.upgrade_count, range);
        aggregate.add(quality, weight);

        details.push(StatDetail {
            key: sub.key.clone(),
            weight,
            quality: to_score(quality),
            upgrade_count: sub.upgrade_count,
            total_rolls: sub.total_rolls(),
            scored: true,
        });
    }

    let sub_stat_score = aggregate.score();
    let score = apply_main_stat_policy(
        core.shape,
        sub_stat_score,
        || weights.triangle_main_weight(&core.main_stat),
        &scorer.params,
    );

    debug!(
        "{}/{}: score={} sub={} details={:?}",
        archetype, talent, score, sub_stat_score, details
    );

    BuildEvaluation {
        archetype,
        talent,
        score,
        sub_stat_score,
        details,
    }
}

/// All six evaluations in fixed order (every talent of crit, then weak).
pub fn evaluate_all(scorer: &Scorer, core: &Core) -> Vec<BuildEvaluation> {
    Archetype::iter()
        .flat_map(|a| Talent::iter().map(move |t| (a, t)))
        .map(|(a, t)| evaluate_build(scorer, a, t, core))
        .collect()
}

/// The strictly best evaluation of an archetype. The first talent in
/// enumeration order wins ties.
pub fn best_for_archetype(
    evaluations: &[BuildEvaluation],
    archetype: Archetype,
) -> Option<&BuildEvaluation> {
    evaluations
        .iter()
        .filter(|e| e.archetype == archetype)
        .fold(None, |best: Option<&BuildEvaluation>, e| match best {
            Some(b) if b.score >= e.score => Some(b),
            _ => Some(e),
        })
}

pub fn score_core(scorer: &Scorer, core: &Core) -> ScoringResult {
    let evaluations = evaluate_all(scorer, core);
    let overall_score = evaluations.iter().map(|e| e.score).max().unwrap_or(0);

    let block = |archetype: Archetype| -> ArchetypeBlock {
        let (details, score, talent) = match best_for_archetype(&evaluations, archetype) {
            Some(best) => (best.details.as_slice(), best.score, best.talent),
            None => (&[][..], 0, Talent::Attack),
        };
        ArchetypeBlock {
            score,
            talent,
            commentary: narrative::commentary(
                details,
                score,
                core,
                &scorer.reference.meta,
                &scorer.params,
            ),
        }
    };

    let crit = block(Archetype::Crit);
    let weak = block(Archetype::Weak);

    // Crit is compared first and keeps ties. Mirrors ScoringResult::winning_archetype.
    let winning_talent = if weak.score > crit.score {
        weak.talent
    } else {
        crit.talent
    };

    let recommend_sets = match scorer.reference.pairings(winning_talent, core.color) {
        Some(pairings) => Recommendation::Pairings(pairings.to_vec()),
        None => Recommendation::Unavailable(scorer.params.missing_pairing_text.clone()),
    };

    let main_value = scorer
        .reference
        .main_stat_value(&core.main_stat, core.level.value())
        .unwrap_or_else(|| {
            warn!(
                "No main stat curve for '{}', reporting value 0",
                core.main_stat
            );
            0.0
        });

    ScoringResult {
        shape: core.shape,
        level: core.level,
        color: core.color,
        main_stat: ResolvedMainStat {
            key: core.main_stat.clone(),
            value: main_value,
        },
        sub_stats: core.sub_stats.clone(),
        overall: OverallBlock {
            score: overall_score,
            talent: winning_talent,
            recommend_sets,
        },
        crit,
        weak,
    }
}
