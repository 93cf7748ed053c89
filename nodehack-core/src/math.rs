/// Bound `value` into `[min, max]`.
///
/// Works for anything `PartialOrd`, so floats and integers alike. The bounds
/// are not checked against each other; callers keep `min <= max`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T
{
  if value < min
  {
    return min;
  }

  if value > max
  {
    return max;
  }

  value
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn test_clamp_inside_range_is_identity()
  {
    assert_eq!(clamp(2.5_f32, 1.0, 4.0), 2.5);
    assert_eq!(clamp(1.0_f32, 1.0, 4.0), 1.0);
    assert_eq!(clamp(4.0_f32, 1.0, 4.0), 4.0);
  }

  #[test]
  fn test_clamp_saturates_at_bounds()
  {
    assert_eq!(clamp(-3.0_f32, 1.0, 4.0), 1.0);
    assert_eq!(clamp(9.0_f32, 1.0, 4.0), 4.0);
    assert_eq!(clamp(f32::INFINITY, 1.0, 4.0), 4.0);
    assert_eq!(clamp(f32::NEG_INFINITY, 1.0, 4.0), 1.0);
  }

  #[test]
  fn test_clamp_integers()
  {
    assert_eq!(clamp(2_u32, 14, 64), 14);
    assert_eq!(clamp(20_u32, 14, 64), 20);
    assert_eq!(clamp(-7_i64, -5, 5), -5);
  }

  #[test]
  fn test_clamp_result_always_in_range()
  {
    let bounds = [(-1.0_f32, 1.0_f32), (0.0, 0.0), (1.0, 4.0), (-100.0, -10.0)];

    for (min, max) in bounds
    {
      let mut value = -250.0_f32;
      while value <= 250.0
      {
        let result = clamp(value, min, max);
        assert!(result >= min && result <= max, "{value} -> {result} not in [{min}, {max}]");

        if value >= min && value <= max
        {
          assert_eq!(result, value);
        }

        value += 7.5;
      }
    }
  }
}
