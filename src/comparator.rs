use crate::CanonicalSize;

/// Decide which value a limit should move to
///
/// - An omitted request targets `Unlimited`.
/// - A finite `max` clamps any target above it (including `Unlimited`).
/// - The result never drops below `current`.
///
/// When `current` is already `Unlimited` it is kept even if `max` is finite;
/// that configuration is inconsistent and is left as-is.
pub fn resolve(
    current: CanonicalSize,
    requested: Option<CanonicalSize>,
    max: CanonicalSize,
) -> CanonicalSize {
    let target = requested.unwrap_or(CanonicalSize::Unlimited);
    let clamped = clamp_to_max(target, max);

    if clamped <= current { current } else { clamped }
}

/// Clamp `target` to `max`, where `Unlimited` means no ceiling
pub fn clamp_to_max(target: CanonicalSize, max: CanonicalSize) -> CanonicalSize {
    target.min(max)
}
