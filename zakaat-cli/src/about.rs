pub const ABOUT_TEXT: &str = "\
About Zakaat

Zakaat is one of the five pillars of Islam. It is an obligatory annual
charity of 2.5% on wealth held above a minimum amount (the Nisab) for a
full lunar year.

Nisab
  Gold:   87.48 grams
  Silver: 612.36 grams
  This calculator uses whichever threshold is lower in value, so more
  people qualify to give.

What counts
  Cash and bank balances, gold and silver (entered in grams), investments,
  business assets, rental income and other assets. Debts you owe are
  subtracted.

Gold and silver prices come from config.toml ([prices]) or the
--gold-price / --silver-price flags. Check current market rates before
relying on the result.
";

pub fn print_about() {
    print!("{ABOUT_TEXT}");
}
