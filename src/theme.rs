use peniko::Color;

/// The three configurable color roles of a bullet row.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
  XValues,
  Bar,
  Target,
}

/// A fixed, indexable sequence of colors. Lookups cycle past the end, so any
/// palette with at least one entry works as a drop-in replacement.
#[derive(Clone, Copy)]
pub struct Palette {
  colors: &'static [Color],
}

pub const DEFAULT: Palette = Palette::new(&[
  Color::from_rgb8(0x00, 0x66, 0xa1), // 0: actual-value blue
  Color::from_rgb8(0x1d, 0x2b, 0x4f), // 1: target navy
  Color::from_rgb8(0x2d, 0x9c, 0xdb),
  Color::from_rgb8(0xe6, 0x7e, 0x22), // 3: over-target orange
  Color::from_rgb8(0x27, 0xae, 0x60),
  Color::from_rgb8(0x8e, 0x44, 0xad),
  Color::from_rgb8(0xc0, 0x39, 0x2b),
  Color::from_rgb8(0xf1, 0xc4, 0x0f),
  Color::from_rgb8(0xd5, 0xdb, 0xe1), // 8: backdrop gray
  Color::from_rgb8(0x7f, 0x8c, 0x9b),
]);

impl Palette {
  pub const fn new(colors: &'static [Color]) -> Self {
    assert!(!colors.is_empty());
    Palette { colors }
  }

  pub fn color(&self, index: usize) -> Color { self.colors[index % self.colors.len()] }

  /// Default palette index per role.
  pub fn for_role(&self, role: Role) -> Color {
    self.color(match role {
      Role::XValues => 0,
      Role::Target => 1,
      Role::Bar => 8,
    })
  }

  /// Warning color for rows whose actual value exceeds the target.
  pub fn over_target(&self) -> Color { self.color(3) }
}

impl Default for Palette {
  fn default() -> Self { DEFAULT }
}

/// Per-role color overrides. Roles left unset resolve through the palette.
#[derive(Clone, Copy, Default)]
pub struct ColorOverrides {
  x_values: Option<Color>,
  bar:      Option<Color>,
  target:   Option<Color>,
}

impl ColorOverrides {
  pub fn set(&mut self, role: Role, color: Color) {
    match role {
      Role::XValues => self.x_values = Some(color),
      Role::Bar => self.bar = Some(color),
      Role::Target => self.target = Some(color),
    }
  }

  pub fn get(&self, role: Role) -> Option<Color> {
    match role {
      Role::XValues => self.x_values,
      Role::Bar => self.bar,
      Role::Target => self.target,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unset_roles_fall_back_to_the_palette() {
    let mut overrides = ColorOverrides::default();
    overrides.set(Role::Bar, Color::from_rgb8(1, 2, 3));

    let bar = overrides.get(Role::Bar).unwrap_or(DEFAULT.for_role(Role::Bar));
    let target = overrides.get(Role::Target).unwrap_or(DEFAULT.for_role(Role::Target));

    assert_eq!(bar, Color::from_rgb8(1, 2, 3));
    assert_eq!(target, DEFAULT.color(1));
  }

  #[test]
  fn palette_indexing_cycles() {
    let palette = Palette::new(&[Color::BLACK, Color::WHITE]);
    assert_eq!(palette.color(0), palette.color(2));
    assert_eq!(palette.color(1), palette.color(5));
  }
}
