/*!

This is the long-form manual for `schulze_voting` and the `schulze` command line program.

## How the count works

Every ballot lists some candidates, best first. A ballot `[A, B, C]` with weight `w`
adds `w` to the preference of `A` over `B`, of `A` over `C` and of `B` over `C`.
Candidates that a ballot does not mention are left out of that ballot entirely:
they are neither ranked last nor tied.

From these pairwise preferences, a candidate `X` has a direct beat over `Y` when
more weight prefers `X` to `Y` than the reverse. The strength of a path of direct
beats is its weakest link, and the strongest path from `X` to `Y` is the path with
the strongest weakest link. `X` beats `Y` under the Schulze method when the strongest
path from `X` to `Y` is stronger than the one from `Y` to `X`.

Candidates are then grouped by the number of other candidates they beat. The group
beating the most candidates comes first. Candidates in the same group are tied.

```text
1: C
2: A, B
```

## Input formats

The following formats are supported by `schulze`:
* `json` the normalized ballot table, in JSON
* `csv` the normalized ballot table, in CSV
* `excel` the normalized ballot table, in an Excel (.xlsx) spreadsheet
* `jotform` the raw export of a JotForm-style ranking question (CSV)

### Normalized ballot table

One row per voter and ranked candidate. Three columns are used:

| column       | default name | content                          |
|--------------|--------------|----------------------------------|
| voter        | `Email`      | any identifier of the voter      |
| candidate    | `Preference` | name of the candidate            |
| rank         | `Position`   | integer, `1` for the first choice |

The column names can be changed with `--voter-column`, `--candidate-column` and
`--rank-column`. Other columns are ignored.

```text
Email,Preference,Position
anna@example.com,Alien,1
anna@example.com,Brazil,2
bob@example.com,Brazil,1
```

The `json` input accepts either a list of records:

```text
[{"Email": "anna@example.com", "Preference": "Alien", "Position": 1}, ...]
```

or a table stored column by column, each column mapping a row index to a value:

```text
{"Email": {"0": "anna@example.com", "1": "anna@example.com"},
 "Preference": {"0": "Alien", "1": "Brazil"},
 "Position": {"0": 1, "1": 2}}
```

The rows of each voter are sorted by rank to form one ballot. Unless candidates are
declared in the configuration, the candidates are all the names found in the table.

### `jotform`

A CSV export in which a single column contains the full ranking of a respondent,
one line per choice, in the form `<position>: <name>`:

```text
Submission Date,Email,Ordina i film in base alle tue preferenze
2022-05-01 10:00:00,anna@example.com,"1: Alien
2: Brazil"
```

The name of this column is given with `--preference-column`. The column holding the
voter is given with `--voter-column` (default `Email`).

The decoded table can be saved with `--normalized-out`. It then also contains the
`Points` of each choice, between `1` (first position) and `0` (last position).
The file is a list of records. Tables saved column by column by other tools can
be read back with the `json` input as well.

## Configuration

All the options can be collected in a JSON configuration file passed with `--config`:

```text
{
  "outputSettings": { "contestName": "Film night" },
  "ballotSources": [
    { "provider": "csv", "filePath": "votes.csv", "rankColumn": "Rank" }
  ],
  "candidates": [ { "name": "Alien" }, { "name": "Brazil" } ]
}
```

- `filePath` is relative to the directory of the configuration file.
- `candidates` is optional. When present, ballots naming another candidate are rejected.
- several sources may be listed; their ballots are counted together.

The options given on the command line take precedence over the configuration file.

 */
