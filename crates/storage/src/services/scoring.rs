/// Points awarded per completed badge.
pub const POINTS_PER_BADGE: i32 = 25;
/// Points awarded per qualifying social media post.
pub const POINTS_PER_POST: i32 = 10;

/// Minimum combined badge count to qualify for a certificate.
pub const CERTIFICATE_MIN_BADGES: i32 = 1;

/// Compute the total points for a participant.
///
/// This is the single scoring formula for every write path: create, edit and
/// batch import all go through here so a participant's stored total can never
/// drift from their badge and post counts.
pub fn compute_points(badges: i32, posts: i32) -> i32 {
    badges.max(0) * POINTS_PER_BADGE + posts.max(0) * POINTS_PER_POST
}

/// Split a combined badge count across the two stored badge columns.
///
/// The split is a storage convention only; reads always sum the two columns
/// back together.
pub fn split_badges(badges: i32) -> (i32, i32) {
    let badges = badges.max(0);
    (badges / 2, badges - badges / 2)
}

/// A participant qualifies for a certificate with at least one badge.
pub fn is_eligible_for_certificate(badges: i32) -> bool {
    badges >= CERTIFICATE_MIN_BADGES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_points_example() {
        // 2 badges and 3 posts: 2*25 + 3*10
        assert_eq!(compute_points(2, 3), 80);
    }

    #[test]
    fn test_compute_points_zero() {
        assert_eq!(compute_points(0, 0), 0);
    }

    #[test]
    fn test_compute_points_monotonic() {
        for b in 0..10 {
            for p in 0..10 {
                assert!(compute_points(b + 1, p) >= compute_points(b, p));
                assert!(compute_points(b, p + 1) >= compute_points(b, p));
            }
        }
    }

    #[test]
    fn test_compute_points_clamps_negative_input() {
        assert_eq!(compute_points(-5, 3), 30);
        assert_eq!(compute_points(2, -1), 50);
    }

    #[test]
    fn test_split_badges_sums_back() {
        for b in 0..20 {
            let (dev, skills) = split_badges(b);
            assert_eq!(dev + skills, b);
        }
    }

    #[test]
    fn test_split_badges_odd_count() {
        assert_eq!(split_badges(5), (2, 3));
    }

    #[test]
    fn test_eligibility_threshold() {
        assert!(!is_eligible_for_certificate(0));
        assert!(is_eligible_for_certificate(1));
        assert!(is_eligible_for_certificate(12));
    }
}
